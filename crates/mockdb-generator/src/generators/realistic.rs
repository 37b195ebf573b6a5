//! Realistic string values: person names, email addresses, phone numbers and
//! natural text.

use crate::words::WordLists;
use rand::seq::SliceRandom;
use rand::Rng;

/// Domains of real-world email providers.
pub const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "aol.com",
    "icloud.com",
    "protonmail.com",
    "mail.com",
    "gmx.com",
    "yandex.com",
    "zoho.com",
    "fastmail.com",
];

/// Number of digits in a phone number.
pub const PHONE_DIGITS: usize = 10;

/// Pick a given name (gender chosen first) and a surname, lower-case as stored.
fn person<'a, R: Rng + ?Sized>(rng: &mut R, words: &'a WordLists) -> (&'a str, &'a str) {
    let given_names = if rng.gen_bool(0.5) {
        words.female_names()
    } else {
        words.male_names()
    };
    let given = given_names.choose(rng).map(String::as_str).unwrap_or_default();
    let surname = words
        .surnames()
        .choose(rng)
        .map(String::as_str)
        .unwrap_or_default();
    (given, surname)
}

/// `"Given Surname"`, both title-cased.
pub fn name_surname<R: Rng + ?Sized>(rng: &mut R, words: &WordLists) -> String {
    let (given, surname) = person(rng, words);
    format!("{} {}", title_case(given), title_case(surname))
}

/// `"given.surname@domain"`, lower-case.
pub fn email<R: Rng + ?Sized>(rng: &mut R, words: &WordLists) -> String {
    let (given, surname) = person(rng, words);
    let domain = EMAIL_DOMAINS.choose(rng).copied().unwrap_or("mail.com");
    format!(
        "{}.{}@{}",
        given.to_lowercase(),
        surname.to_lowercase(),
        domain
    )
}

/// Ten uniformly random digits.
pub fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    random_digits(rng, PHONE_DIGITS)
}

/// `count` corpus words joined by single spaces, with repetition.
pub fn natural_text<R: Rng + ?Sized>(rng: &mut R, words: &WordLists, count: usize) -> String {
    let mut text = String::new();
    for i in 0..count {
        if i > 0 {
            text.push(' ');
        }
        if let Some(word) = words.words().choose(rng) {
            text.push_str(word);
        }
    }
    text
}

/// `length` letters drawn uniformly from `[A-Za-z]`.
pub fn random_letters<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    (0..length)
        .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
        .collect()
}

fn random_digits<R: Rng + ?Sized>(rng: &mut R, digits: usize) -> String {
    (0..digits)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Upper-case the first character and lower-case the rest.
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
