#[test]
fn litsift_doctor_contract_json_keys() {
    let bin = assert_cmd::cargo::cargo_bin!("litsift");
    let tmp = tempfile::tempdir().expect("export dir");
    let out = std::process::Command::new(bin)
        .args(["doctor", "--export-dir"])
        .arg(tmp.path())
        // Ensure we don't accidentally inherit overrides from the environment.
        .env_remove("LITSIFT_PDF_FALLBACK")
        .env_remove("LITSIFT_OPENALEX_ENDPOINT")
        .output()
        .expect("run litsift doctor");

    assert!(out.status.success(), "litsift doctor failed");
    let s = String::from_utf8_lossy(&out.stdout);
    let v: serde_json::Value = serde_json::from_str(&s).expect("parse doctor json");

    assert_eq!(v["schema_version"].as_u64(), Some(1));
    assert_eq!(v["kind"].as_str(), Some("doctor"));
    assert_eq!(v["ok"].as_bool(), Some(true));
    assert_eq!(v["name"].as_str(), Some("litsift"));
    assert!(!v["version"].as_str().unwrap_or("").is_empty());
    assert!(v.get("elapsed_ms").is_some());
    assert!(!v["platform"]["os"].as_str().unwrap_or("").is_empty());

    // Config surface: resolved values, no secrets involved.
    assert_eq!(v["configured"]["pdf_fallback"].as_str(), Some("auto"));
    assert_eq!(
        v["configured"]["openalex_endpoint"].as_str(),
        Some("https://api.openalex.org")
    );
    assert_eq!(
        v["configured"]["export_dir"].as_str(),
        tmp.path().to_str()
    );

    let checks = v["checks"].as_array().expect("checks array");
    let lexicons = checks
        .iter()
        .find(|c| c["name"].as_str() == Some("lexicons"))
        .expect("lexicons check");
    assert_eq!(lexicons["ok"].as_bool(), Some(true));
    assert!(lexicons["message"]
        .as_str()
        .unwrap_or("")
        .contains("target="));

    let export = checks
        .iter()
        .find(|c| c["name"].as_str() == Some("export_dir_writable"))
        .expect("export_dir_writable check");
    assert_eq!(export["ok"].as_bool(), Some(true));

    let engine = checks
        .iter()
        .find(|c| c["name"].as_str() == Some("pdf_engine"))
        .expect("pdf_engine check");
    assert_eq!(engine["ok"].as_bool(), Some(true));
    assert_eq!(engine["message"].as_str(), Some("round-trip ok"));
}

#[test]
fn doctor_reports_broken_lexicon_without_failing_the_process() {
    let bin = assert_cmd::cargo::cargo_bin!("litsift");
    let tmp = tempfile::tempdir().expect("export dir");
    let out = std::process::Command::new(bin)
        .args(["doctor", "--target-lexicon", "/nonexistent/terms.txt", "--export-dir"])
        .arg(tmp.path())
        .env_remove("LITSIFT_PDF_FALLBACK")
        .env_remove("LITSIFT_OPENALEX_ENDPOINT")
        .output()
        .expect("run litsift doctor");

    // Doctor reports problems in the payload; it does not abort.
    assert!(out.status.success(), "doctor must exit zero");
    let v: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&out.stdout)).expect("parse doctor json");
    assert_eq!(v["ok"].as_bool(), Some(false));

    let checks = v["checks"].as_array().expect("checks array");
    let lexicons = checks
        .iter()
        .find(|c| c["name"].as_str() == Some("lexicons"))
        .expect("lexicons check");
    assert_eq!(lexicons["ok"].as_bool(), Some(false));
    assert!(lexicons["message"]
        .as_str()
        .unwrap_or("")
        .contains("lexicon load failed"));
    assert!(!lexicons["hint"].as_str().unwrap_or("").is_empty());
}

#[test]
fn doctor_reports_env_overrides_in_configured() {
    let bin = assert_cmd::cargo::cargo_bin!("litsift");
    let tmp = tempfile::tempdir().expect("export dir");
    let out = std::process::Command::new(bin)
        .args(["doctor", "--export-dir"])
        .arg(tmp.path())
        .env("LITSIFT_PDF_FALLBACK", "off")
        .env("LITSIFT_OPENALEX_ENDPOINT", "http://127.0.0.1:9/openalex")
        .output()
        .expect("run litsift doctor");

    assert!(out.status.success());
    let v: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&out.stdout)).expect("parse doctor json");
    assert_eq!(v["configured"]["pdf_fallback"].as_str(), Some("off"));
    assert_eq!(
        v["configured"]["openalex_endpoint"].as_str(),
        Some("http://127.0.0.1:9/openalex")
    );
}
