//! Built-in word lists: normalizer exclusion data and the default
//! screening lexicons.
//!
//! Everything here is plain const data. Sets are built where they are
//! used, at store construction; there is no global lazy state.

// ---- Normalizer exclusion data ----

/// Standard English stopword list (apostrophe forms reduced to their
/// alphanumeric fragments, which is what the normalizer produces:
/// "don't" tokenizes as "don" + "t").
pub(crate) const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and", "any",
    "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "couldn", "d", "did", "didn", "do", "does", "doesn", "doing",
    "don", "down", "during", "each", "few", "for", "from", "further", "had", "hadn", "has",
    "hasn", "have", "haven", "having", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just", "ll", "m",
    "ma", "me", "mightn", "more", "most", "mustn", "my", "myself", "needn", "no", "nor", "not",
    "now", "o", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves",
    "out", "over", "own", "re", "s", "same", "shan", "she", "should", "shouldn", "so", "some",
    "such", "t", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "ve",
    "very", "was", "wasn", "we", "were", "weren", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "won", "wouldn", "y", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Common English given names, used to drop author/bibliography noise from
/// the token stream. Curated to avoid words that double as ordinary prose
/// ("grace", "mark", "will" and similar are deliberately absent).
pub(crate) const PERSONAL_NAMES: &[&str] = &[
    "aaron", "abigail", "adam", "alan", "albert", "alexander", "alice", "amanda", "amber", "amy",
    "andrea", "andrew", "angela", "ann", "anna", "anne", "anthony", "arthur", "ashley", "austin",
    "barbara", "benjamin", "bernard", "beth", "betty", "beverly", "bonnie", "bradley", "brandon",
    "brenda", "brian", "brittany", "bruce", "bryan", "carl", "carol", "caroline", "carolyn",
    "catherine", "charles", "charlotte", "cheryl", "christina", "christine", "christopher",
    "cindy", "claire", "clara", "clarence", "craig", "cynthia", "dale", "daniel", "danielle",
    "david", "deborah", "debra", "denise", "dennis", "diana", "diane", "donald", "donna",
    "doris", "dorothy", "douglas", "dylan", "earl", "edward", "eleanor", "elizabeth", "emily",
    "emma", "eric", "erin", "ernest", "ethan", "eugene", "evelyn", "frances", "francis", "fred",
    "gabriel", "gary", "george", "gerald", "gloria", "gordon", "gregory", "hannah", "harold",
    "harry", "heather", "helen", "henry", "howard", "irene", "isaac", "jack", "jacob",
    "jacqueline", "james", "jane", "janet", "janice", "jason", "jean", "jeffrey", "jennifer",
    "jeremy", "jerry", "jesse", "jessica", "joan", "joe", "john", "jonathan", "jose", "joseph",
    "joshua", "joyce", "juan", "judith", "judy", "julia", "julie", "justin", "karen",
    "katherine", "kathleen", "kathryn", "keith", "kelly", "kenneth", "kevin", "kimberly",
    "kyle", "larry", "laura", "lauren", "lawrence", "leonard", "linda", "lisa", "lori", "louis",
    "louise", "lucas", "madison", "margaret", "maria", "marie", "marilyn", "martha", "martin",
    "mary", "matthew", "megan", "melissa", "michael", "michelle", "mildred", "nancy", "natalie",
    "nathan", "nicholas", "nicole", "noah", "norma", "olivia", "pamela", "patricia", "patrick",
    "paul", "paula", "peter", "philip", "phillip", "phyllis", "rachel", "ralph", "randy",
    "raymond", "rebecca", "richard", "robert", "roger", "ronald", "roy", "russell", "ruth",
    "ryan", "samantha", "samuel", "sandra", "sara", "sarah", "scott", "sean", "sharon",
    "shirley", "stanley", "stephanie", "stephen", "steven", "susan", "sylvia", "teresa",
    "terry", "theresa", "thomas", "timothy", "tina", "todd", "tyler", "valerie", "victoria",
    "vincent", "virginia", "walter", "wayne", "wendy", "william", "willie", "zachary",
];

// ---- Default screening lexicons ----
//
// The stock vocabulary screens prosocial-design literature: reward design
// and platform-intervention language, demote clinical and medical bycatch, and
// tag research-methodology terms for reporting. Override any set with a
// listing file when screening a different topic.

pub(crate) const DEFAULT_TARGET_TERMS: &[&str] = &[
    "prosocial",
    "design",
    "intervention",
    "reddit",
    "humane",
    "social media",
    "user experience",
    "nudge",
    "choice architecture",
    "user interface",
    "misinformation",
    "disinformation",
    "trump",
    "conspiracy",
    "dysinformation",
    "users",
    "thaler",
    "sunstein",
    "boost",
];

pub(crate) const DEFAULT_BYCATCH_TERMS: &[&str] = &[
    "psychology",
    "pediatric",
    "pediatry",
    "autism",
    "mental",
    "medical",
    "oxytocin",
    "adolescence",
    "infant",
    "health",
    "wellness",
    "child",
    "care",
    "mindfulness",
];

pub(crate) const DEFAULT_RESEARCH_TERMS: &[&str] = &[
    "big data",
    "data",
    "analytics",
    "randomized controlled trial",
    "rct",
    "moderation",
    "community",
    "social media",
    "conversational",
    "control",
    "randomized",
    "systemic",
    "analysis",
    "thematic",
    "review",
    "study",
    "case series",
    "case report",
    "double blind",
    "ecological",
    "survey",
];
