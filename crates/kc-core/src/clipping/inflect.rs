//! Rule-based English singularization.
//!
//! Rules are checked newest-first, so a later, more specific rule overrides
//! the generic ones registered before it. Input is expected lower-case.

use regex::Regex;
use std::sync::OnceLock;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

/// Singular-form rules in registration order. Later rules win.
const SINGULAR_RULES: &[(&str, &str)] = &[
    (r"s$", ""),
    (r"(ss)$", "${1}"),
    (
        r"(wi|kni|(?:after|half|high|low|mid|non|night|[^\w]|^)li)ves$",
        "${1}fe",
    ),
    (r"(ar|(?:wo|[ae])l|[eo][ao])ves$", "${1}f"),
    (r"ies$", "y"),
    (
        r"(dg|ss|ois|lk|ok|wn|mb|th|ch|ec|oal|is|ck|ix|sser|ts|wb)ies$",
        "${1}ie",
    ),
    (
        r"\b(l|(?:neck|cross|hog|aun)?t|coll|faer|food|gen|goon|group|hipp|junk|vegg|(?:pork)?p|charl|calor|cut)ies$",
        "${1}ie",
    ),
    (r"\b(mon|smil)ies$", "${1}ey"),
    (r"\b((?:tit)?m|l)ice$", "${1}ouse"),
    (r"(seraph|cherub)im$", "${1}"),
    (
        r"(x|ch|ss|sh|zz|tto|go|cho|alias|[^aou]us|t[lm]as|gas|(?:her|at|gr)o|[aeiou]ris)(?:es)?$",
        "${1}",
    ),
    (
        r"(analy|diagno|parenthe|progno|synop|the|empha|cri|ne)(?:sis|ses)$",
        "${1}sis",
    ),
    (r"(movie|twelve|abuse|e[mn]u)s$", "${1}"),
    (r"(test)(?:is|es)$", "${1}is"),
    (
        r"(alumn|syllab|vir|radi|nucle|fung|cact|stimul|termin|bacill|foc|uter|loc|strat)(?:us|i)$",
        "${1}us",
    ),
    (
        r"(agend|addend|millenni|dat|extrem|bacteri|desiderat|strat|candelabr|errat|ov|symposi|curricul|quor)a$",
        "${1}um",
    ),
    (
        r"(apheli|hyperbat|periheli|asyndet|noumen|phenomen|criteri|organ|prolegomen|hedr|automat)a$",
        "${1}on",
    ),
    (r"(alumn|alg|vertebr)ae$", "${1}a"),
    (r"(cod|mur|sil|vert|ind)ices$", "${1}ex"),
    (r"(matr|append)ices$", "${1}ix"),
    (r"(pe)(rson|ople)$", "${1}rson"),
    (r"(child)ren$", "${1}"),
    (r"(eau)x?$", "${1}"),
    (r"men$", "man"),
];

/// Word endings that never change between singular and plural.
const UNCOUNTABLE_PATTERNS: &[&str] = &[
    r"[^aeiou]ese$",
    r"deer$",
    r"fish$",
    r"measles$",
    r"o[iu]s$",
    r"pox$",
    r"sheep$",
];

const UNCOUNTABLE_WORDS: &[&str] = &[
    "adulthood", "advice", "agenda", "aid", "aircraft", "alcohol", "ammo", "analytics", "anime",
    "athletics", "audio", "bison", "blood", "bream", "buffalo", "butter", "carp", "cash",
    "chassis", "chess", "clothing", "cod", "commerce", "cooperation", "corps", "debris",
    "diabetes", "digestion", "elk", "energy", "equipment", "excretion", "expertise", "firmware",
    "flounder", "fun", "gallows", "garbage", "graffiti", "hardware", "headquarters", "health",
    "herpes", "highjinks", "homework", "housework", "information", "jeans", "justice", "kudos",
    "labour", "literature", "machinery", "mackerel", "mail", "media", "mews", "moose", "music",
    "mud", "manga", "news", "only", "personnel", "pike", "plankton", "pliers", "police",
    "pollution", "premises", "rain", "research", "rice", "salmon", "scissors", "series",
    "sewage", "shambles", "shrimp", "software", "staff", "swine", "tennis", "traffic",
    "transportation", "trout", "tuna", "wealth", "welfare", "whiting", "wildebeest", "wildlife",
    "you",
];

/// `(singular, plural)` pairs the rules get wrong.
const IRREGULARS: &[(&str, &str)] = &[
    ("i", "we"),
    ("me", "us"),
    ("he", "they"),
    ("she", "they"),
    ("them", "them"),
    ("myself", "ourselves"),
    ("yourself", "yourselves"),
    ("itself", "themselves"),
    ("herself", "themselves"),
    ("himself", "themselves"),
    ("themself", "themselves"),
    ("is", "are"),
    ("was", "were"),
    ("has", "have"),
    ("this", "these"),
    ("that", "those"),
    ("echo", "echoes"),
    ("dingo", "dingoes"),
    ("volcano", "volcanoes"),
    ("tornado", "tornadoes"),
    ("torpedo", "torpedoes"),
    ("genus", "genera"),
    ("viscus", "viscera"),
    ("stigma", "stigmata"),
    ("stoma", "stomata"),
    ("dogma", "dogmata"),
    ("lemma", "lemmata"),
    ("schema", "schemata"),
    ("anathema", "anathemata"),
    ("ox", "oxen"),
    ("axe", "axes"),
    ("die", "dice"),
    ("yes", "yeses"),
    ("foot", "feet"),
    ("eave", "eaves"),
    ("goose", "geese"),
    ("tooth", "teeth"),
    ("quiz", "quizzes"),
    ("human", "humans"),
    ("proof", "proofs"),
    ("carve", "carves"),
    ("valve", "valves"),
    ("looey", "looies"),
    ("thief", "thieves"),
    ("groove", "grooves"),
    ("pickaxe", "pickaxes"),
    ("passerby", "passersby"),
];

fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(&format!("(?i){pattern}")).ok()
}

fn singular_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        SINGULAR_RULES
            .iter()
            .filter_map(|(pattern, replacement)| {
                compile(pattern).map(|pattern| Rule {
                    pattern,
                    replacement,
                })
            })
            .collect()
    })
}

fn uncountable_rules() -> &'static [Regex] {
    static RULES: OnceLock<Vec<Regex>> = OnceLock::new();
    RULES.get_or_init(|| UNCOUNTABLE_PATTERNS.iter().filter_map(|p| compile(p)).collect())
}

fn is_uncountable(word: &str) -> bool {
    UNCOUNTABLE_WORDS.contains(&word) || uncountable_rules().iter().any(|r| r.is_match(word))
}

/// Returns the singular form of `word`, or `word` itself when it already is
/// singular or has no distinct singular.
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let token = word.to_lowercase();

    if let Some((singular, _)) = IRREGULARS.iter().find(|(_, plural)| *plural == token) {
        return (*singular).to_string();
    }
    if IRREGULARS.iter().any(|(singular, _)| *singular == token) || is_uncountable(&token) {
        return token;
    }

    singular_rules()
        .iter()
        .rev()
        .find(|rule| rule.pattern.is_match(&token))
        .map(|rule| {
            rule.pattern
                .replace(&token, rule.replacement)
                .into_owned()
        })
        .unwrap_or(token)
}

/// Whether `word` is a plural form that singularizes to something else.
pub fn is_plural(word: &str) -> bool {
    singularize(word) != word.to_lowercase()
}
