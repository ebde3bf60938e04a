use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::assets::vocabulary::{ActiveWord, WordEntry, WritingMode};

/// Stand-in option when the pool cannot supply enough distinct wrong answers.
pub const PLACEHOLDER: &str = "?";

/// Options per question, the correct one included.
pub const OPTION_COUNT: usize = 3;

/// A multiple-choice question: show the target-language word, pick its
/// source-language rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quiz {
    pub question: WordEntry,
    pub options: Vec<String>,
}

impl Quiz {
    /// The correct option under `mode`.
    pub fn correct_answer(&self, mode: WritingMode) -> &str {
        self.question.display_text(mode)
    }

    pub fn is_correct(&self, answer: &str, mode: WritingMode) -> bool {
        answer == self.correct_answer(mode)
    }
}

/// Build a quiz from `pool`, or `None` when the pool is empty.
///
/// Distractors come from other words' display text, skipping any that render
/// the same as the correct answer or each other, then padded with
/// [`PLACEHOLDER`].
pub fn build_quiz<'a, R, I>(pool: I, mode: WritingMode, rng: &mut R) -> Option<Quiz>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a ActiveWord>,
{
    let pool: Vec<&ActiveWord> = pool.into_iter().collect();
    let question = *pool.choose(rng)?;
    let correct = question.entry.display_text(mode).to_string();

    let mut candidates: Vec<&str> = pool
        .iter()
        .filter(|w| w.id() != question.id())
        .map(|w| w.entry.display_text(mode))
        .filter(|text| *text != correct)
        .collect();
    candidates.sort_unstable();
    candidates.dedup();
    candidates.shuffle(rng);

    let mut options: Vec<String> = Vec::with_capacity(OPTION_COUNT);
    options.push(correct);
    options.extend(
        candidates
            .into_iter()
            .take(OPTION_COUNT - 1)
            .map(str::to_string),
    );
    while options.len() < OPTION_COUNT {
        options.push(PLACEHOLDER.to_string());
    }
    options.shuffle(rng);

    Some(Quiz {
        question: question.entry.clone(),
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::vocabulary::Category;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn word(id: &str, jp: &str, kana: &str, romaji: &str) -> ActiveWord {
        ActiveWord::new(WordEntry {
            id: id.into(),
            en: id.to_uppercase(),
            jp: jp.into(),
            hiragana: kana.into(),
            romaji: romaji.into(),
            category: Category::Food,
            difficulty: 1,
        })
    }

    #[test]
    fn single_word_pool_pads_with_placeholders() {
        let pool = vec![word("f1", "米", "こめ", "kome")];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let quiz = build_quiz(&pool, WritingMode::Kanji, &mut rng).unwrap();

        assert_eq!(quiz.options.len(), 3);
        assert_eq!(quiz.options.iter().filter(|o| *o == "米").count(), 1);
        assert_eq!(quiz.options.iter().filter(|o| *o == PLACEHOLDER).count(), 2);
    }

    #[test]
    fn correct_answer_appears_exactly_once() {
        let pool = vec![
            word("f1", "米", "こめ", "kome"),
            word("f2", "水", "みず", "mizu"),
            word("f3", "茶", "ちゃ", "cha"),
            word("f4", "肉", "にく", "niku"),
        ];
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let quiz = build_quiz(&pool, WritingMode::Romaji, &mut rng).unwrap();
            let correct = quiz.correct_answer(WritingMode::Romaji);
            assert_eq!(quiz.options.len(), 3);
            assert_eq!(quiz.options.iter().filter(|o| *o == correct).count(), 1);
            assert!(!quiz.options.contains(&PLACEHOLDER.to_string()));
        }
    }

    #[test]
    fn homographs_do_not_duplicate_the_answer() {
        // Same kana for both words: the second cannot serve as a distractor.
        let pool = vec![word("h1", "橋", "はし", "hashi"), word("h2", "箸", "はし", "hashi")];
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let quiz = build_quiz(&pool, WritingMode::Hiragana, &mut rng).unwrap();
        assert_eq!(quiz.options.iter().filter(|o| *o == "はし").count(), 1);
        assert_eq!(quiz.options.iter().filter(|o| *o == PLACEHOLDER).count(), 2);
    }

    #[test]
    fn empty_pool_builds_nothing() {
        let pool: Vec<ActiveWord> = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(build_quiz(&pool, WritingMode::Kanji, &mut rng).is_none());
    }

    #[test]
    fn answers_check_against_writing_mode() {
        let pool = vec![word("f1", "米", "こめ", "kome")];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let quiz = build_quiz(&pool, WritingMode::Kanji, &mut rng).unwrap();
        assert!(quiz.is_correct("米", WritingMode::Kanji));
        assert!(quiz.is_correct("kome", WritingMode::Romaji));
        assert!(!quiz.is_correct("?", WritingMode::Kanji));
    }
}
