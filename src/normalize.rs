//! Text normalization: boundary repair, case folding, punctuation removal,
//! and stopword filtering with a domain-term whitelist.
//!
//! Normalization is a pure function of its configuration (language,
//! whitelist) and input. An empty token list is a valid result and means
//! "no indexable content".

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

static STOP_ID: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "ada", "adalah", "adanya", "adapun", "agak", "agar", "akan", "akankah", "akhirnya", "aku",
        "anda", "antar", "antara", "apa", "apabila", "apakah", "apalagi", "atas", "atau", "ataupun",
        "bagai", "bagaimana", "bagi", "bahkan", "bahwa", "banyak", "beberapa", "begitu", "belum",
        "berapa", "bisa", "bila", "boleh", "bukan", "dahulu", "dalam", "dan", "dapat", "dari",
        "daripada", "demi", "demikian", "dengan", "di", "dia", "dialah", "dini", "diri", "dong",
        "dulu", "enggak", "hanya", "harus", "hingga", "ia", "ialah", "ini", "inilah", "itu",
        "itulah", "jadi", "jangan", "jika", "juga", "kalau", "kami", "kamu", "kapan", "karena",
        "kau", "ke", "kembali", "kemudian", "kenapa", "kepada", "ketika", "kita", "lagi", "lah",
        "lain", "lalu", "lebih", "maka", "makin", "mana", "masih", "mau", "melainkan", "melalui",
        "memang", "mengapa", "mereka", "meski", "meskipun", "misalnya", "mungkin", "namun", "nanti",
        "oleh", "pada", "padahal", "para", "per", "pernah", "pula", "pun", "saat", "saja", "sama",
        "sambil", "sampai", "sana", "sangat", "saya", "sebab", "sebagai", "sebelum", "sebuah",
        "secara", "sedang", "sedangkan", "sehingga", "sejak", "sekali", "sekarang", "selain",
        "selama", "seluruh", "sementara", "semua", "sendiri", "seorang", "seperti", "sering",
        "serta", "sesudah", "setelah", "setiap", "siapa", "sini", "situ", "suatu", "sudah", "supaya",
        "tanpa", "tapi", "telah", "tentang", "terhadap", "tersebut", "tetapi", "tiap", "tidak",
        "untuk", "walau", "walaupun", "yaitu", "yakni", "yang",
    ]
    .into_iter()
    .collect()
});

static STOP_EN: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is",
        "it", "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there",
        "these", "they", "this", "to", "was", "will", "with",
    ]
    .into_iter()
    .collect()
});

/// Stopword language selector.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Indonesian,
    English,
}

impl Language {
    fn stopwords(self) -> &'static HashSet<&'static str> {
        match self {
            Language::Indonesian => &STOP_ID,
            Language::English => &STOP_EN,
        }
    }
}

/// Converts raw field text into a token sequence.
#[derive(Debug, Clone)]
pub struct Normalizer {
    language: Language,
    whitelist: HashSet<String>,
}

impl Normalizer {
    /// Create a normalizer for `language`. Whitelisted terms are never
    /// treated as stopwords, even when the base list contains them.
    pub fn new(language: Language, whitelist: impl IntoIterator<Item = String>) -> Self {
        let whitelist = whitelist
            .into_iter()
            .map(|term| term.to_lowercase())
            .collect();
        Self { language, whitelist }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn whitelist(&self) -> impl Iterator<Item = &str> {
        self.whitelist.iter().map(String::as_str)
    }

    /// Normalize `text` into its surviving tokens, in order.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let repaired = repair_word_boundaries(text);
        let lowered = repaired.to_lowercase();
        let stripped: String = lowered
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();

        let stopwords = self.language.stopwords();
        stripped
            .split_whitespace()
            .filter(|token| !stopwords.contains(token) || self.whitelist.contains(*token))
            .map(str::to_string)
            .collect()
    }

    /// Normalize and space-join, the form stored for vectorization.
    pub fn normalize_joined(&self, text: &str) -> String {
        self.normalize(text).join(" ")
    }
}

/// Insert a space at every lowercase-to-uppercase boundary.
///
/// Repairs concatenations like "pesawatUnited" -> "pesawat United". This is
/// a heuristic for one known corruption pattern, not word segmentation: an
/// all-lowercase concatenation passes through untouched (the substring
/// fallback covers those at query time).
fn repair_word_boundaries(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_lower = false;
    for c in text.chars() {
        if prev_lower && c.is_uppercase() {
            out.push(' ');
        }
        prev_lower = c.is_lowercase();
        out.push(c);
    }
    out
}
