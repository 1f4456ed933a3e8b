//! Thin wrappers over `fake` so generators draw every faked string from the run's RNG.

use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, StateName, StreetName};
use fake::faker::company::en::{CatchPhrase, CompanyName};
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use rand::Rng;

pub fn person_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    Name().fake_with_rng::<String, _>(rng)
}

pub fn first_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    FirstName().fake_with_rng::<String, _>(rng)
}

pub fn last_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    LastName().fake_with_rng::<String, _>(rng)
}

pub fn company<R: Rng + ?Sized>(rng: &mut R) -> String {
    CompanyName().fake_with_rng::<String, _>(rng)
}

pub fn catch_phrase<R: Rng + ?Sized>(rng: &mut R) -> String {
    CatchPhrase().fake_with_rng::<String, _>(rng)
}

pub fn city<R: Rng + ?Sized>(rng: &mut R) -> String {
    CityName().fake_with_rng::<String, _>(rng)
}

pub fn state<R: Rng + ?Sized>(rng: &mut R) -> String {
    StateName().fake_with_rng::<String, _>(rng)
}

/// "12 Smith Street" style line.
pub fn street_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    format!("{number} {street}")
}

pub fn word<R: Rng + ?Sized>(rng: &mut R) -> String {
    Word().fake_with_rng::<String, _>(rng)
}

/// Filler sentence of exactly `words` words.
pub fn sentence<R: Rng + ?Sized>(rng: &mut R, words: usize) -> String {
    let n = words.max(1);
    Sentence(n..n + 1).fake_with_rng::<String, _>(rng)
}
