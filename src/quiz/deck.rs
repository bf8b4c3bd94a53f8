//! Question deck with ordering and looping rules.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::distractors::make_distractors;
use super::question::Question;

/// Order in which questions are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionOrder {
    /// File order.
    Top,
    /// Reverse file order.
    Bottom,
    /// Shuffled, and reshuffled on every pass.
    #[default]
    Random,
}

/// What happens when every question has been asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionMode {
    /// Ask each question once, then end the run.
    OneEach,
    /// Start another pass.
    #[default]
    Loop,
}

/// A question on screen with its shuffled choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// The question being asked.
    pub question: Question,
    /// Correct answer and distractors in display order.
    pub choices: Vec<String>,
    /// Index of the correct answer in `choices`.
    pub correct_index: usize,
}

impl Round {
    /// Whether `choice` is the correct answer.
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}

/// Result of drawing from the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draw {
    /// A new question.
    Round(Round),
    /// Every question was asked once in [`QuestionMode::OneEach`].
    Exhausted,
    /// The deck holds no questions.
    Empty,
}

/// Questions in draw order plus the answer pool used for distractors.
#[derive(Debug, Clone)]
pub struct QuizDeck {
    questions: Vec<Question>,
    answer_pool: Vec<String>,
    order: QuestionOrder,
    mode: QuestionMode,
    cursor: usize,
}

impl QuizDeck {
    /// Creates a deck and applies `order` to it.
    pub fn new<R: Rng + ?Sized>(
        questions: Vec<Question>,
        order: QuestionOrder,
        mode: QuestionMode,
        rng: &mut R,
    ) -> Self {
        let answer_pool = questions.iter().map(|q| q.answer.clone()).collect();
        let mut deck = Self {
            questions,
            answer_pool,
            order,
            mode,
            cursor: 0,
        };
        match order {
            QuestionOrder::Top => {}
            QuestionOrder::Bottom => deck.questions.reverse(),
            QuestionOrder::Random => deck.questions.shuffle(rng),
        }
        deck
    }

    /// Draws the next question.
    ///
    /// In loop mode a finished pass starts over; a random deck is reshuffled
    /// first, top and bottom decks keep their order.
    pub fn next_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Draw {
        if self.questions.is_empty() {
            return Draw::Empty;
        }
        if self.cursor >= self.questions.len() {
            match self.mode {
                QuestionMode::OneEach => return Draw::Exhausted,
                QuestionMode::Loop => {
                    self.cursor = 0;
                    if self.order == QuestionOrder::Random {
                        self.questions.shuffle(rng);
                    }
                    log::debug!("question deck starting a new pass");
                }
            }
        }

        let question = self.questions[self.cursor].clone();
        self.cursor += 1;

        let mut choices = make_distractors(&question.answer, &self.answer_pool, rng);
        choices.push(question.answer.clone());
        choices.shuffle(rng);
        let correct_index = choices
            .iter()
            .position(|c| *c == question.answer)
            .unwrap_or_default();

        Draw::Round(Round {
            question,
            choices,
            correct_index,
        })
    }

    /// Questions left in the current pass.
    pub fn remaining(&self) -> usize {
        self.questions.len().saturating_sub(self.cursor)
    }

    /// Questions drawn in the current pass.
    pub fn drawn(&self) -> usize {
        self.cursor
    }

    /// Whether the last drawn question ends the run.
    pub fn is_final_round(&self) -> bool {
        self.mode == QuestionMode::OneEach && self.cursor >= self.questions.len()
    }

    /// Question mode of this deck.
    pub fn mode(&self) -> QuestionMode {
        self.mode
    }

    /// Number of questions in the deck.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the deck has no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
