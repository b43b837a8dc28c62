//! Static phonetic tables for Russian → Latin pronunciation.
//!
//! Lookups are performed on the lowercase form; uppercase letters share the
//! lowercase fragment.

// ── Single-letter rules ──────────────────────────────────────────────

/// One Latin fragment per lowercase Cyrillic letter.
pub(crate) const CHARACTER_RULES: &[(char, &str)] = &[
    // Vowels
    ('а', "a"),
    ('е', "ye"),
    ('ё', "yo"),
    ('и', "ee"),
    ('о', "o"),
    ('у', "oo"),
    ('ы', "y"),
    ('э', "e"),
    ('ю', "yu"),
    ('я', "ya"),
    // Consonants
    ('б', "b"),
    ('в', "v"),
    ('г', "g"),
    ('д', "d"),
    ('ж', "zh"),
    ('з', "z"),
    ('й', "y"),
    ('к', "k"),
    ('л', "l"),
    ('м', "m"),
    ('н', "n"),
    ('п', "p"),
    ('р', "r"),
    ('с', "s"),
    ('т', "t"),
    ('ф', "f"),
    ('х', "kh"),
    ('ц', "ts"),
    ('ч', "ch"),
    ('ш', "sh"),
    ('щ', "shch"),
    // Hard and soft signs
    ('ъ', "'"),
    ('ь', "'"),
];

// ── Digraph overrides ────────────────────────────────────────────────

/// Letter pairs whose combined sound replaces the two single-letter rules.
pub(crate) const DIGRAPH_RULES: &[([char; 2], &str)] = &[
    (['ж', 'ч'], "shch"),
    (['ж', 'ш'], "zhsh"),
    (['ч', 'ш'], "chsh"),
    (['т', 'с'], "ts"),
    (['д', 'с'], "ds"),
    (['з', 'ж'], "zzh"),
    (['с', 'ж'], "szh"),
    (['с', 'ч'], "sch"),
];

// ── Curated whole words ──────────────────────────────────────────────

pub(crate) const COMMON_WORDS: &[(&str, &str)] = &[
    // Greetings
    ("привет", "privet"),
    ("здравствуйте", "zdravstvuyte"),
    ("доброе", "dobroye"),
    ("утро", "utro"),
    ("день", "dyen"),
    ("вечер", "vecher"),
    ("добрый", "dobryy"),
    ("пока", "poka"),
    ("до", "do"),
    ("свидания", "svidaniya"),
    // Everyday words
    ("как", "kak"),
    ("дела", "dela"),
    ("хорошо", "khorosho"),
    ("плохо", "plokho"),
    ("спасибо", "spasibo"),
    ("пожалуйста", "pozhalusta"),
    ("извините", "izvinite"),
    ("да", "da"),
    ("нет", "nyet"),
    ("что", "chto"),
    ("где", "gde"),
    ("когда", "kogda"),
    ("почему", "pochemu"),
    ("кто", "kto"),
    ("я", "ya"),
    ("ты", "ty"),
    ("он", "on"),
    ("она", "ona"),
    ("оно", "ono"),
    ("мы", "my"),
    ("вы", "vy"),
    ("они", "oni"),
    ("это", "eto"),
    ("то", "to"),
    ("все", "vse"),
    ("всего", "vsego"),
    ("очень", "ochen"),
    ("много", "mnogo"),
    ("мало", "malo"),
    ("большой", "bolshoy"),
    ("маленький", "malenkiy"),
    ("новый", "novyy"),
    ("старый", "staryy"),
    ("хороший", "khoroshiy"),
    ("плохой", "plokhoy"),
    ("красивый", "krasivyy"),
    ("красивая", "krasivaya"),
    ("красивое", "krasivoye"),
    ("красивые", "krasivye"),
    ("изучаю", "izuchayu"),
    ("русский", "russkiy"),
    ("язык", "yazyk"),
    ("слово", "slovo"),
    ("предложение", "predlozheniye"),
    ("текст", "tekst"),
    ("книга", "kniga"),
    ("дом", "dom"),
    ("работа", "rabota"),
    ("семья", "semya"),
    ("друг", "drug"),
    ("подруга", "podruga"),
    ("любовь", "lyubov"),
    ("жизнь", "zhizn"),
    ("время", "vremya"),
    ("место", "mesto"),
    ("город", "gorod"),
    ("страна", "strana"),
    ("мир", "mir"),
    ("человек", "chelovek"),
    ("люди", "lyudi"),
    ("ребенок", "rebenok"),
    ("дети", "deti"),
    ("мужчина", "muzhchina"),
    ("женщина", "zhenschina"),
    ("мама", "mama"),
    ("папа", "papa"),
    ("брат", "brat"),
    ("сестра", "sestra"),
    ("бабушка", "babushka"),
    ("дедушка", "dedushka"),
    // Food and drink
    ("еда", "eda"),
    ("вода", "voda"),
    ("хлеб", "khleb"),
    ("молоко", "moloko"),
    ("чай", "chay"),
    ("кофе", "kofe"),
    ("мясо", "myaso"),
    ("рыба", "ryba"),
    ("овощи", "ovoshchi"),
    ("фрукты", "frukty"),
    // Colours
    ("цвет", "tsvet"),
    ("красный", "krasnyy"),
    ("синий", "siniy"),
    ("зеленый", "zelenyy"),
    ("желтый", "zheltyy"),
    ("белый", "belyy"),
    ("черный", "chernyy"),
    // Numbers
    ("число", "chislo"),
    ("один", "odin"),
    ("два", "dva"),
    ("три", "tri"),
    ("четыре", "chetyre"),
    ("пять", "pyat"),
    ("шесть", "shest"),
    ("семь", "sem"),
    ("восемь", "vosem"),
    ("девять", "devyat"),
    ("десять", "desyat"),
];
