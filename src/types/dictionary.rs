use serde::{Deserialize, Serialize};

/// Literal placeholder substituted with the looked-up word.
pub const WORD_PLACEHOLDER: &str = "{word}";

/// Prefix of ids assigned to user-created dictionaries.
pub const CUSTOM_ID_PREFIX: &str = "custom-";

/// A dictionary source: a named URL template opened in a tab for each lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dictionary {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub enabled: bool,
    pub builtin: bool,
}

impl Dictionary {
    fn builtin(id: &str, name: &str, url: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            url: url.to_string(),
            icon: None,
            enabled: true,
            builtin: true,
        }
    }
}

/// Input for creating a custom dictionary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewDictionary {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Partial update applied to an existing dictionary. `None` leaves a field as is;
/// a blank `icon` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DictionaryUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// The dictionaries seeded on first use, in menu order.
pub fn builtin_dictionaries() -> Vec<Dictionary> {
    vec![
        Dictionary::builtin(
            "merriam-webster",
            "Merriam-Webster",
            "https://www.merriam-webster.com/dictionary/{word}",
        ),
        Dictionary::builtin(
            "oxford",
            "Oxford",
            "https://www.oxfordlearnersdictionaries.com/definition/english/{word}",
        ),
        Dictionary::builtin(
            "cambridge",
            "Cambridge",
            "https://dictionary.cambridge.org/dictionary/english/{word}",
        ),
        Dictionary::builtin(
            "dictionary-com",
            "Dictionary.com",
            "https://www.dictionary.com/browse/{word}",
        ),
        Dictionary::builtin(
            "urban-dictionary",
            "Urban Dictionary",
            "https://www.urbandictionary.com/define.php?term={word}",
        ),
        Dictionary::builtin(
            "wiktionary",
            "Wiktionary",
            "https://en.wiktionary.org/wiki/{word}",
        ),
        Dictionary::builtin(
            "google",
            "Google",
            "https://www.google.com/search?q=define+{word}",
        ),
        Dictionary::builtin(
            "collins",
            "Collins Dictionary",
            "https://www.collinsdictionary.com/dictionary/english/{word}",
        ),
        Dictionary::builtin(
            "longman",
            "Longman Dictionary",
            "https://www.ldoceonline.com/dictionary/{word}",
        ),
        Dictionary::builtin(
            "vocabulary",
            "Vocabulary.com",
            "https://www.vocabulary.com/dictionary/{word}",
        ),
        Dictionary::builtin(
            "free-dictionary",
            "The Free Dictionary",
            "https://www.thefreedictionary.com/{word}",
        ),
        Dictionary::builtin(
            "yourdictionary",
            "YourDictionary",
            "https://www.yourdictionary.com/{word}",
        ),
        Dictionary::builtin(
            "wordreference",
            "WordReference",
            "https://www.wordreference.com/definition/{word}",
        ),
        Dictionary::builtin(
            "onelook",
            "OneLook Dictionary Search",
            "https://www.onelook.com/?w={word}",
        ),
        Dictionary::builtin(
            "etymonline",
            "Etymonline",
            "https://www.etymonline.com/word/{word}",
        ),
        Dictionary::builtin(
            "rhymezone",
            "RhymeZone",
            "https://www.rhymezone.com/r/rhyme.cgi?Word={word}&typeofrhyme=def",
        ),
    ]
}
