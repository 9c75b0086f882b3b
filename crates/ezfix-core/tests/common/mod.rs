//! Builders for MARC fixture files.

use ezfix_core::marc::{Field, Record};

/// A catalog record with an 001, a title, and one 856 per entry of `links`.
pub fn catalog_record(id: &str, links: &[&[&str]]) -> Record {
    let mut rec = Record::default()
        .with_field(Field::control("001", id))
        .with_field(Field::control("008", "240101s2024    xxu     o     000 0 eng d"))
        .with_field(Field::data("245", *b"10", &[(b'a', "Journal of examples /"), (b'c', "Ed.")]));
    for urls in links {
        let mut subfields: Vec<(u8, &str)> = urls.iter().map(|u| (b'u', *u)).collect();
        subfields.push((b'z', "Off-campus access"));
        rec.push(Field::data("856", *b"40", &subfields));
    }
    rec
}

pub fn encode(records: &[Record]) -> Vec<u8> {
    records
        .iter()
        .flat_map(|r| r.to_bytes().expect("encodable fixture"))
        .collect()
}
