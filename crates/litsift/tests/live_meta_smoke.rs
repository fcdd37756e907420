#[test]
fn litsift_live_meta_resolves_a_known_doi_opt_in() {
    // Hits the public OpenAlex API. Opt-in so CI and offline machines
    // never depend on the network.
    if std::env::var("LITSIFT_LIVE").ok().as_deref() != Some("1") {
        eprintln!("skipping: set LITSIFT_LIVE=1 to run live meta smoke");
        return;
    }

    let dir = tempfile::tempdir().expect("artifact dir");
    let bin = assert_cmd::cargo::cargo_bin!("litsift");
    let out = std::process::Command::new(bin)
        .args(["meta", "--doi", "10.1038/s41586-020-2649-2"])
        .args(["--timeout-ms", "15000", "--out"])
        .arg(dir.path().join("meta.json"))
        .env_remove("LITSIFT_OPENALEX_ENDPOINT")
        .output()
        .expect("run litsift meta");

    assert!(
        out.status.success(),
        "live meta failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let v: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&out.stdout)).expect("parse meta payload");
    assert_eq!(v["ok"].as_bool(), Some(true));
    let paper = &v["results"][0];
    assert_eq!(paper["doi"].as_str(), Some("10.1038/s41586-020-2649-2"));
    assert!(!paper["title"].as_str().unwrap_or("").is_empty());
    assert_eq!(paper["year"].as_i64(), Some(2020));
    assert!(!paper["authors"]
        .as_array()
        .map(|a| a.is_empty())
        .unwrap_or(true));
}
