//! Default adjective lexicon for the sentiment scorer.
//!
//! Each entry is `(word, polarity, subjectivity, intensity)`. Polarity is in
//! [-1, 1], subjectivity in [0, 1]. Entries with zero polarity and an
//! intensity other than 1.0 are intensifiers: they scale the next scored
//! word instead of being scored themselves.

/// Built-in lexicon entries.
pub const ENTRIES: &[(&str, f64, f64, f64)] = &[
    // Intensifiers
    ("very", 0.0, 0.0, 1.3),
    ("really", 0.0, 0.0, 1.3),
    ("extremely", 0.0, 0.0, 1.5),
    ("highly", 0.0, 0.0, 1.3),
    ("incredibly", 0.0, 0.0, 1.4),
    ("truly", 0.0, 0.0, 1.2),
    ("quite", 0.0, 0.0, 1.1),
    ("most", 0.0, 0.0, 1.2),
    ("slightly", 0.0, 0.0, 0.7),
    ("somewhat", 0.0, 0.0, 0.8),
    // Positive
    ("good", 0.7, 0.6, 1.0),
    ("great", 0.8, 0.75, 1.0),
    ("excellent", 1.0, 1.0, 1.0),
    ("best", 1.0, 0.3, 1.0),
    ("better", 0.5, 0.5, 1.0),
    ("amazing", 0.6, 0.9, 1.0),
    ("awesome", 1.0, 1.0, 1.0),
    ("wonderful", 1.0, 1.0, 1.0),
    ("fantastic", 0.4, 0.9, 1.0),
    ("perfect", 1.0, 1.0, 1.0),
    ("beautiful", 0.85, 1.0, 1.0),
    ("nice", 0.6, 1.0, 1.0),
    ("happy", 0.8, 1.0, 1.0),
    ("glad", 0.5, 1.0, 1.0),
    ("love", 0.5, 0.6, 1.0),
    ("lovely", 0.5, 0.75, 1.0),
    ("positive", 0.23, 0.55, 1.0),
    ("successful", 0.75, 0.95, 1.0),
    ("effective", 0.6, 0.8, 1.0),
    ("efficient", 0.4, 0.6, 1.0),
    ("important", 0.4, 1.0, 1.0),
    ("significant", 0.38, 0.88, 1.0),
    ("innovative", 0.5, 0.75, 1.0),
    ("impressive", 1.0, 1.0, 1.0),
    ("valuable", 0.5, 0.75, 1.0),
    ("useful", 0.3, 0.0, 1.0),
    ("helpful", 0.5, 0.5, 1.0),
    ("easy", 0.43, 0.83, 1.0),
    ("strong", 0.43, 0.73, 1.0),
    ("powerful", 0.3, 1.0, 1.0),
    ("clear", 0.1, 0.38, 1.0),
    ("smart", 0.21, 0.64, 1.0),
    ("interesting", 0.5, 0.5, 1.0),
    ("exciting", 0.3, 0.8, 1.0),
    ("fun", 0.3, 0.2, 1.0),
    ("safe", 0.5, 0.5, 1.0),
    ("reliable", 0.5, 0.5, 1.0),
    ("popular", 0.6, 0.8, 1.0),
    ("remarkable", 0.75, 0.75, 1.0),
    ("outstanding", 0.5, 0.67, 1.0),
    ("brilliant", 0.9, 1.0, 1.0),
    ("advanced", 0.4, 0.6, 1.0),
    ("improved", 0.5, 0.5, 1.0),
    ("modern", 0.2, 0.3, 1.0),
    ("new", 0.14, 0.45, 1.0),
    // Negative
    ("bad", -0.7, 0.67, 1.0),
    ("worse", -0.4, 0.6, 1.0),
    ("worst", -1.0, 1.0, 1.0),
    ("poor", -0.4, 0.6, 1.0),
    ("terrible", -1.0, 1.0, 1.0),
    ("awful", -1.0, 1.0, 1.0),
    ("horrible", -1.0, 1.0, 1.0),
    ("sad", -0.5, 1.0, 1.0),
    ("unhappy", -0.6, 0.9, 1.0),
    ("angry", -0.5, 1.0, 1.0),
    ("difficult", -0.5, 1.0, 1.0),
    ("hard", -0.29, 0.54, 1.0),
    ("wrong", -0.5, 0.9, 1.0),
    ("dangerous", -0.6, 0.9, 1.0),
    ("harmful", -0.5, 0.7, 1.0),
    ("expensive", -0.5, 0.7, 1.0),
    ("slow", -0.3, 0.4, 1.0),
    ("weak", -0.38, 0.63, 1.0),
    ("negative", -0.3, 0.4, 1.0),
    ("serious", -0.33, 0.67, 1.0),
    ("critical", -0.1, 0.8, 1.0),
    ("complex", -0.3, 0.4, 1.0),
    ("risky", -0.5, 0.6, 1.0),
    ("boring", -1.0, 1.0, 1.0),
    ("ugly", -0.7, 1.0, 1.0),
    ("stupid", -0.8, 1.0, 1.0),
    ("useless", -0.5, 0.2, 1.0),
    ("failed", -0.5, 0.3, 1.0),
    ("broken", -0.4, 0.4, 1.0),
    ("disappointing", -0.6, 0.7, 1.0),
    ("painful", -0.7, 0.9, 1.0),
    ("impossible", -0.67, 1.0, 1.0),
    ("limited", -0.07, 0.14, 1.0),
    ("old", 0.1, 0.2, 1.0),
    ("little", -0.19, 0.5, 1.0),
    // Neutral but subjective
    ("possible", 0.0, 1.0, 1.0),
    ("likely", 0.0, 1.0, 1.0),
    ("real", 0.2, 0.3, 1.0),
    ("public", 0.0, 0.07, 1.0),
];

/// Words that flip the polarity of the next scored word.
pub const NEGATIONS: &[&str] = &["not", "n't", "never", "no", "without"];
