//! Deterministic questions used when the model cannot supply enough valid ones.
//!
//! Dedicated banks are keyed by exact topic display name. Any other topic gets
//! the generic templates, which interpolate the topic name and always have the
//! first option correct. Nothing here touches the network or can fail.

use crate::quiz::{Question, QuizSet, OPTION_COUNT, QUIZ_LENGTH};

struct BankEntry {
    question: &'static str,
    options: [&'static str; OPTION_COUNT],
    correct_index: usize,
}

const fn entry(question: &'static str, options: [&'static str; OPTION_COUNT], correct_index: usize) -> BankEntry {
    BankEntry { question, options, correct_index }
}

type Bank = [BankEntry; QUIZ_LENGTH];

static TOPIC_BANKS: &[(&str, Bank)] = &[
    (
        "Wellness",
        [
            entry("Which of these is recommended for better sleep?", ["Caffeine before bed", "Regular sleep schedule", "Screen time", "Heavy meals"], 1),
            entry("What is mindfulness?", ["Sleeping more", "Present moment awareness", "Multitasking", "Speed reading"], 1),
            entry("How much water should adults drink daily?", ["1 cup", "8 cups", "20 cups", "No water needed"], 1),
            entry("Which activity reduces stress?", ["Meditation", "Overworking", "Skipping meals", "Isolation"], 0),
            entry("What's a benefit of regular exercise?", ["Fatigue", "Better mood", "Weight gain", "Insomnia"], 1),
        ],
    ),
    (
        "Tech Trends",
        [
            entry("What does AI stand for?", ["Artificial Intelligence", "Automated Internet", "Advanced Integration", "Auto Interface"], 0),
            entry("What is cloud computing?", ["Weather prediction", "Remote data storage and processing", "Airplane technology", "Photography"], 1),
            entry("What is blockchain?", ["A game", "Distributed ledger technology", "Social media", "Email service"], 1),
            entry("What does IoT mean?", ["Internet of Things", "Input of Text", "Internal Operations", "Image Optimization"], 0),
            entry("What is machine learning?", ["Robot building", "AI learning from data", "Computer repair", "Typing practice"], 1),
        ],
    ),
    (
        "Space Exploration",
        [
            entry("Which planet is known as the Red Planet?", ["Venus", "Mars", "Jupiter", "Saturn"], 1),
            entry("What is the closest star to Earth?", ["Polaris", "Sirius", "The Sun", "Alpha Centauri"], 2),
            entry("Who was the first human in space?", ["Neil Armstrong", "Yuri Gagarin", "Buzz Aldrin", "John Glenn"], 1),
            entry("What is a light-year?", ["Time unit", "Distance unit", "Speed unit", "Weight unit"], 1),
            entry("Which planet has the most moons?", ["Earth", "Mars", "Saturn", "Mercury"], 2),
        ],
    ),
    (
        "World History",
        [
            entry("In which year did World War II end?", ["1943", "1945", "1947", "1950"], 1),
            entry("Who was the first President of the United States?", ["Abraham Lincoln", "Thomas Jefferson", "George Washington", "John Adams"], 2),
            entry("Which ancient wonder was located in Egypt?", ["Colossus of Rhodes", "Great Pyramid of Giza", "Hanging Gardens", "Temple of Artemis"], 1),
            entry("The Renaissance began in which country?", ["France", "England", "Italy", "Spain"], 2),
            entry("Who discovered America in 1492?", ["Vasco da Gama", "Ferdinand Magellan", "Christopher Columbus", "Amerigo Vespucci"], 2),
        ],
    ),
    (
        "Science & Nature",
        [
            entry("What is the chemical symbol for water?", ["O2", "H2O", "CO2", "NaCl"], 1),
            entry("What is the largest organ in the human body?", ["Heart", "Liver", "Skin", "Brain"], 2),
            entry("What gas do plants absorb from the air?", ["Oxygen", "Nitrogen", "Carbon Dioxide", "Hydrogen"], 2),
            entry("What is the hardest natural substance?", ["Gold", "Iron", "Diamond", "Platinum"], 2),
            entry("How many bones are in the adult human body?", ["106", "206", "306", "406"], 1),
        ],
    ),
    (
        "Pop Culture",
        [
            entry("Which band performed 'Bohemian Rhapsody'?", ["The Beatles", "Queen", "Led Zeppelin", "Pink Floyd"], 1),
            entry("What year was the first iPhone released?", ["2005", "2007", "2009", "2010"], 1),
            entry("Who directed the movie 'Titanic'?", ["Steven Spielberg", "James Cameron", "Christopher Nolan", "Martin Scorsese"], 1),
            entry("Which streaming platform produces 'Stranger Things'?", ["Amazon Prime", "Hulu", "Netflix", "Disney+"], 2),
            entry("What social media app is known for short videos?", ["Facebook", "Twitter", "TikTok", "LinkedIn"], 2),
        ],
    ),
];

/// `{}` is replaced with the topic name.
static GENERIC_BANK: Bank = [
    entry("What is a key aspect of {}?", ["Knowledge", "Ignorance", "Confusion", "None"], 0),
    entry("Why is {} important?", ["Personal growth", "No reason", "Waste of time", "Harmful"], 0),
    entry("How can one learn about {}?", ["Reading and practice", "Sleeping", "Ignoring it", "Running away"], 0),
    entry("What skill helps in {}?", ["Critical thinking", "Laziness", "Procrastination", "Denial"], 0),
    entry("Who can benefit from {}?", ["Everyone", "No one", "Only experts", "Only children"], 0),
];

/// Topics with a hand-authored bank, in catalog order.
pub fn dedicated_topics() -> impl Iterator<Item = &'static str> {
    TOPIC_BANKS.iter().map(|(name, _)| *name)
}

pub fn has_dedicated_bank(topic: &str) -> bool {
    TOPIC_BANKS.iter().any(|(name, _)| *name == topic)
}

/// Fallback question for a 1-based `slot`. Slots past the bank size wrap around.
pub fn fallback_question(topic: &str, slot: usize) -> Question {
    let index = slot.saturating_sub(1) % QUIZ_LENGTH;
    let dedicated = TOPIC_BANKS
        .iter()
        .find(|(name, _)| *name == topic)
        .map(|(_, bank)| &bank[index]);

    let (question, entry) = match dedicated {
        Some(entry) => (entry.question.to_owned(), entry),
        None => {
            let entry = &GENERIC_BANK[index];
            (entry.question.replace("{}", topic), entry)
        }
    };

    Question {
        id: slot,
        question,
        options: entry.options.map(str::to_owned),
        correct_index: entry.correct_index,
    }
}

/// A complete quiz made only of fallback questions for slots 1..=5.
pub fn fallback_quiz(topic: &str) -> QuizSet {
    QuizSet::assemble(std::iter::empty(), |slot| fallback_question(topic, slot))
}
