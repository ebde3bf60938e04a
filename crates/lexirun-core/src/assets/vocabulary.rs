use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::api::types::Language;

/// Built-in vocabulary, bundled at compile time.
#[cfg(feature = "builtin-vocabulary")]
const BUILTIN_VOCABULARY: &str = include_str!("../../data/vocabulary.json");

/// Failure while loading a vocabulary catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to parse vocabulary: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("vocabulary contains no words")]
    Empty,
    #[error("word {id} has difficulty {difficulty}, expected 1..=3")]
    InvalidDifficulty { id: String, difficulty: u8 },
    #[error("duplicate word id {0}")]
    DuplicateId(String),
}

/// Vocabulary category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Animals,
    Food,
    Colors,
    Numbers,
    Nature,
    Body,
    Greetings,
    People,
    Objects,
    Verbs,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Animals,
        Category::Food,
        Category::Colors,
        Category::Numbers,
        Category::Nature,
        Category::Body,
        Category::Greetings,
        Category::People,
        Category::Objects,
        Category::Verbs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Animals => "animals",
            Category::Food => "food",
            Category::Colors => "colors",
            Category::Numbers => "numbers",
            Category::Nature => "nature",
            Category::Body => "body",
            Category::Greetings => "greetings",
            Category::People => "people",
            Category::Objects => "objects",
            Category::Verbs => "verbs",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// How source-language text is written on quiz options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WritingMode {
    /// Full orthography (kanji with kana).
    #[default]
    Kanji,
    /// Phonetic kana only.
    Hiragana,
    /// Latin transliteration.
    Romaji,
}

impl WritingMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "KANJI" => Some(WritingMode::Kanji),
            "HIRAGANA" => Some(WritingMode::Hiragana),
            "ROMAJI" => Some(WritingMode::Romaji),
            _ => None,
        }
    }
}

/// One catalog entry. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub id: String,
    /// Target-language text.
    pub en: String,
    /// Source-language text in full orthography.
    pub jp: String,
    pub hiragana: String,
    pub romaji: String,
    pub category: Category,
    /// 1 = easy, 2 = medium, 3 = hard.
    pub difficulty: u8,
}

impl WordEntry {
    /// Text shown on an orb for the given side of the pair.
    pub fn orb_text(&self, language: Language) -> &str {
        match language {
            Language::Source => &self.jp,
            Language::Target => &self.en,
        }
    }

    /// Source-language text rendered in the given writing mode.
    pub fn display_text(&self, mode: WritingMode) -> &str {
        match mode {
            WritingMode::Kanji => &self.jp,
            WritingMode::Hiragana => &self.hiragana,
            WritingMode::Romaji => &self.romaji,
        }
    }
}

/// A catalog word drawn into the current run, with its mastery counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveWord {
    #[serde(flatten)]
    pub entry: WordEntry,
    pub mastery: u32,
}

impl ActiveWord {
    pub fn new(entry: WordEntry) -> Self {
        Self { entry, mastery: 0 }
    }

    pub fn id(&self) -> &str {
        &self.entry.id
    }
}

/// Source of words for a run.
pub trait WordSource {
    /// Up to `count` distinct words from `categories` with difficulty at most
    /// `max_difficulty`, skipping ids in `exclude`. Returns fewer when the
    /// filtered pool is smaller; never fails.
    fn sample_words(
        &self,
        categories: &[Category],
        count: usize,
        max_difficulty: u8,
        exclude: &[&str],
        rng: &mut dyn RngCore,
    ) -> Vec<WordEntry>;
}

/// In-memory catalog loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    words: Vec<WordEntry>,
}

impl Vocabulary {
    pub fn new(words: Vec<WordEntry>) -> Result<Self, CatalogError> {
        let vocabulary = Self { words };
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    /// Parse a catalog of the form `{ "words": [ ... ] }`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let vocabulary: Vocabulary = serde_json::from_str(json)?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    /// The vocabulary bundled with the crate.
    #[cfg(feature = "builtin-vocabulary")]
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_VOCABULARY)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.words.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = std::collections::HashSet::with_capacity(self.words.len());
        for word in &self.words {
            if !(1..=3).contains(&word.difficulty) {
                return Err(CatalogError::InvalidDifficulty {
                    id: word.id.clone(),
                    difficulty: word.difficulty,
                });
            }
            if !seen.insert(word.id.as_str()) {
                return Err(CatalogError::DuplicateId(word.id.clone()));
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&WordEntry> {
        self.words.iter().find(|w| w.id == id)
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &WordEntry> {
        self.words.iter().filter(move |w| w.category == category)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordSource for Vocabulary {
    fn sample_words(
        &self,
        categories: &[Category],
        count: usize,
        max_difficulty: u8,
        exclude: &[&str],
        rng: &mut dyn RngCore,
    ) -> Vec<WordEntry> {
        let mut pool: Vec<&WordEntry> = self
            .words
            .iter()
            .filter(|w| categories.contains(&w.category))
            .filter(|w| w.difficulty <= max_difficulty)
            .filter(|w| !exclude.contains(&w.id.as_str()))
            .collect();
        pool.shuffle(rng);
        pool.into_iter().take(count).cloned().collect()
    }
}
