use super::TranslationEntry;

/// Curated translations installed into every new cache.
const SEED: &[(&str, &str, &str, &str, &str)] = &[
    (
        "привет",
        "Hello / Hi",
        "Привет, как дела? - Hello, how are you?",
        "Interjection",
        "A1",
    ),
    (
        "здравствуйте",
        "Hello (formal)",
        "Здравствуйте, рад вас видеть. - Hello, nice to see you.",
        "Interjection",
        "A1",
    ),
    (
        "спасибо",
        "Thank you",
        "Спасибо за помощь. - Thank you for help.",
        "Interjection",
        "A1",
    ),
    (
        "пожалуйста",
        "Please / You're welcome",
        "Пожалуйста, помогите мне. - Please help me.",
        "Interjection",
        "A1",
    ),
    (
        "извините",
        "Excuse me / Sorry",
        "Извините, где банк? - Excuse me, where is the bank?",
        "Interjection",
        "A1",
    ),
    ("да", "Yes", "Да, я понимаю. - Yes, I understand.", "Particle", "A1"),
    ("нет", "No", "Нет, я не знаю. - No, I don't know.", "Particle", "A1"),
    (
        "хорошо",
        "Good / Well / OK",
        "Хорошо, я согласен. - OK, I agree.",
        "Adverb",
        "A1",
    ),
    ("плохо", "Bad / Poorly", "Мне плохо. - I feel bad.", "Adverb", "A1"),
    (
        "как",
        "How / As / Like",
        "Как дела? - How are you?",
        "Adverb/Conjunction",
        "A1",
    ),
    (
        "дела",
        "Affairs / Matters / Things",
        "Как дела? - How are things?",
        "Noun (plural)",
        "A1",
    ),
    (
        "русский",
        "Russian",
        "Я изучаю русский язык. - I study Russian language.",
        "Adjective",
        "A1",
    ),
    (
        "язык",
        "Language / Tongue",
        "Русский язык - Russian language",
        "Noun (masculine)",
        "A1",
    ),
    ("я", "I", "Я студент. - I am a student.", "Personal Pronoun", "A1"),
    (
        "изучаю",
        "I study / I am studying",
        "Я изучаю русский. - I study Russian.",
        "Verb (1st person)",
        "A1",
    ),
];

pub(crate) fn entries() -> impl Iterator<Item = (String, TranslationEntry)> {
    SEED.iter().map(|(word, meaning, examples, grammar, level)| {
        (
            (*word).to_string(),
            TranslationEntry::new(meaning, examples, grammar, level),
        )
    })
}
