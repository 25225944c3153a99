//! Integration tests for HY3 reading and writing.

use std::io::Cursor;

use hytek_hy3::checksum::verify_line;
use hytek_hy3::{
    DqDescription, FileDescriptor, Hy3Document, Hy3Error, Hy3Reader, Hy3ReaderOptions, Hy3Writer,
    IndividualEntry, IndividualResult, MeetAddress, MeetInfo, SplitTime, Splits, Swimmer,
    SwimmerInfo, Team, TeamAddress, TeamContact, TeamName, encode_hy3, parse_hy3_bytes, read_hy3,
    read_hy3_with_options, write_hy3,
};
use hytek_model::{Classification, Gender, ReactionTime, Stroke, Time, TimeCode};
use proptest::prelude::*;

/// Write a document to memory and read it back.
fn roundtrip(doc: &Hy3Document) -> Hy3Document {
    let mut buffer = Vec::new();
    {
        let mut writer = Hy3Writer::new(Cursor::new(&mut buffer));
        writer.write_document(doc).unwrap();
    }
    Hy3Reader::new(Cursor::new(&buffer)).read_document().unwrap()
}

fn meet_fixture() -> Hy3Document {
    let mut entry = IndividualEntry::new("12A", Stroke::Medley, 200);
    entry.gender = Some(Gender::Male);
    entry.swimmer_id_event = 17;
    entry.swimmer_abbr = "KELLY".to_string();
    entry.age_lower = "011".to_string();
    entry.age_upper = "109".to_string();
    entry.event_fee = 4.5;
    entry.seed_time_1 = "2:41.07".parse().unwrap();
    entry.seed_course_1 = "S".to_string();

    let mut result = IndividualResult::seeded(3, 4);
    result.classification = Some(Classification::Finals);
    result.time = "2:39.88".parse().unwrap();
    result.length_unit = "S".to_string();
    result.place_in_heat = 1;
    result.place_overall = 6;
    result.readings[0] = Time::from_hundredths(15_988);
    result.reaction_time = ReactionTime(0.71);
    result.splits.push(Splits::from_pairs([
        (2, Time::from_hundredths(3_612)),
        (4, Time::from_hundredths(7_840)),
    ]));
    entry.result = Some(result);

    let mut scratched = IndividualEntry::new("14", Stroke::Freestyle, 50);
    let mut dq = IndividualResult::seeded(1, 2);
    dq.time_code = TimeCode::FalseStart;
    dq.dq = Some(DqDescription {
        code: "1A".to_string(),
        description: "Early take-off".to_string(),
    });
    scratched.result = Some(dq);

    Hy3Document {
        file_descriptor: Some(FileDescriptor {
            file_type: "02".to_string(),
            type_description: "Meet Entries".to_string(),
            vendor_name: "Hy-Tek, Ltd".to_string(),
            software_version: "Win-TM 8.0".to_string(),
            date: "03162025".to_string(),
            time: "9:41 AM".to_string(),
            licensed_to: "Orca Swim Club".to_string(),
        }),
        meet_info: Some(MeetInfo {
            name: "Spring Open".to_string(),
            facility: "National Aquatic Centre".to_string(),
            start: "03282025".to_string(),
            end: "03302025".to_string(),
            age_up: "03282025".to_string(),
            elevation: "0".to_string(),
        }),
        meet_address: Some(MeetAddress {
            course: "S".to_string(),
            unknown3: 12.5,
            ..MeetAddress::default()
        }),
        meet_contact: None,
        teams: vec![Team {
            name: Some(TeamName {
                abbr: "ORCA".to_string(),
                name: "Orca Swim Club".to_string(),
                lsc: "LN".to_string(),
                team_type: "AGE".to_string(),
                ..TeamName::default()
            }),
            address: Some(TeamAddress {
                city: "Galway".to_string(),
                country: "IRL".to_string(),
                ..TeamAddress::default()
            }),
            contact: Some(TeamContact {
                email: "club@example.com".to_string(),
                ..TeamContact::default()
            }),
            swimmers: vec![Swimmer {
                info: SwimmerInfo {
                    gender: Some(Gender::Male),
                    swimmer_id_event: 17,
                    last_name: "Kelly".to_string(),
                    first_name: "Sean".to_string(),
                    id: "IRL01234".to_string(),
                    uss_number: "IRL01234".to_string(),
                    birth: "05122013".to_string(),
                    age: 11,
                    ..SwimmerInfo::default()
                },
                entries: vec![entry, scratched],
            }],
        }],
    }
}

#[test]
fn test_fixture_roundtrip() {
    let doc = meet_fixture();
    assert_eq!(roundtrip(&doc), doc);
}

#[test]
fn test_id_shares_registration_columns() {
    let mut doc = meet_fixture();
    let info = &mut doc.teams[0].swimmers[0].info;
    info.id = "K17".to_string();
    info.uss_number = "IRL01234567890".to_string();

    let back = roundtrip(&doc);
    let read = &back.teams[0].swimmers[0].info;
    assert_eq!(read.id, "K17");
    assert_eq!(read.uss_number, "     K17567890");

    let info = &mut doc.teams[0].swimmers[0].info;
    info.uss_number = format!("{:>8}", info.id);
    assert_eq!(roundtrip(&doc), doc);
}

#[test]
fn test_serializes_to_json() {
    let doc = meet_fixture();
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["teams"][0]["name"]["abbr"], "ORCA");

    let entry = &json["teams"][0]["swimmers"][0]["entries"][0];
    assert_eq!(entry["event_number"], "12A");
    assert_eq!(entry["seed_time_1"], "2:41.07");
    assert_eq!(entry["result"]["time"], "2:39.88");

    let back: Hy3Document = serde_json::from_value(json).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn test_written_file_passes_strict_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entries.hy3");
    let doc = meet_fixture();

    write_hy3(&path, &doc).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 13 * 132);
    assert!(bytes.chunks(132).all(|line| verify_line(line) == Some(true)));

    let back = read_hy3_with_options(&path, Hy3ReaderOptions::strict()).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn test_strict_read_rejects_stale_checksum() {
    let mut bytes = encode_hy3(&meet_fixture()).unwrap();
    // line 2 (B1): change the meet name without resealing
    bytes[132 + 2] = b'Z';
    bytes[132 + 3] = b'Z';

    assert!(parse_hy3_bytes(&bytes, &Hy3ReaderOptions::default()).is_ok());
    let err = parse_hy3_bytes(&bytes, &Hy3ReaderOptions::strict()).unwrap_err();
    assert!(matches!(err, Hy3Error::ChecksumMismatch { line: 2, .. }));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_hy3(&dir.path().join("nope.hy3")).unwrap_err();
    assert!(matches!(err, Hy3Error::FileNotFound { .. }));
}

#[test]
fn test_reads_latin1_names() {
    let mut doc = meet_fixture();
    doc.teams[0].swimmers[0].info.last_name = "Ó Súilleabháin".to_string();
    let bytes = encode_hy3(&doc).unwrap();
    // one byte per char on disk
    assert_eq!(bytes.len(), 13 * 132);
    assert_eq!(roundtrip(&doc), doc);
}

#[test]
fn test_unix_line_endings() {
    let bytes = encode_hy3(&meet_fixture()).unwrap();
    let unix: Vec<u8> = bytes
        .chunks(132)
        .flat_map(|line| line[..130].iter().copied().chain([b'\n']))
        .collect();
    let doc = parse_hy3_bytes(&unix, &Hy3ReaderOptions::strict()).unwrap();
    assert_eq!(doc, meet_fixture());
}

fn gender() -> impl Strategy<Value = Option<Gender>> {
    prop::option::of(prop::sample::select(vec![
        Gender::Male,
        Gender::Female,
        Gender::Mixed,
    ]))
}

fn time(max_hundredths: u32) -> impl Strategy<Value = Time> + Clone {
    (0..max_hundredths).prop_map(Time::from_hundredths)
}

prop_compose! {
    fn arb_swimmer_info()(
        gender in gender(),
        swimmer_id_event in 0..100_000u32,
        last_name in "[A-Za-z]{0,20}",
        first_name in "[A-Za-z]{0,20}",
        middle_initial in "[A-Z]?",
        registration in prop_oneof![
            "[A-Z0-9]{0,8}".prop_map(|id| {
                // an empty USS number still reads back the right-justified id
                let uss = if id.is_empty() { String::new() } else { format!("{id:>8}") };
                (id, uss)
            }),
            "[A-Z0-9]{14}".prop_map(|uss| (uss[..8].to_string(), uss)),
        ],
        swimmer_id_team in 0..100_000u32,
        birth in "[0-9]{8}",
        age in 0..100u32,
    ) -> SwimmerInfo {
        let (id, uss_number) = registration;
        SwimmerInfo {
            gender,
            swimmer_id_event,
            last_name,
            first_name,
            middle_initial,
            id,
            uss_number,
            swimmer_id_team,
            birth,
            age,
            ..SwimmerInfo::default()
        }
    }
}

prop_compose! {
    fn arb_split()(
        marker in "[A-Z]?",
        length in 0..100u32,
        time in time(100_000),
    ) -> SplitTime {
        SplitTime { marker, length, time }
    }
}

prop_compose! {
    fn arb_result()(
        classification in prop::option::of(prop::sample::select(vec![
            Classification::Prelims,
            Classification::Finals,
        ])),
        time in time(100_000),
        time_code in prop::sample::select(vec![
            TimeCode::Normal,
            TimeCode::Scratch,
            TimeCode::NoShow,
            TimeCode::FalseStart,
        ]),
        heat in 0..1000u32,
        lane in 0..1000u32,
        place_overall in 0..10_000u32,
        readings in prop::array::uniform5(time(100_000)),
        reaction in prop_oneof![Just(0u32), 1..1000u32],
        splits in prop::collection::vec(
            prop::collection::vec(arb_split(), 0..=11).prop_map(|times| Splits { times }),
            0..3,
        ),
        dq in prop::option::of(("[0-9][A-Z]", "[A-Za-z]{0,40}")),
    ) -> IndividualResult {
        IndividualResult {
            classification,
            time,
            time_code,
            heat,
            lane,
            place_overall,
            readings,
            reaction_time: ReactionTime(f64::from(reaction) / 100.0),
            splits,
            dq: dq.map(|(code, description)| DqDescription { code, description }),
            ..IndividualResult::default()
        }
    }
}

prop_compose! {
    fn arb_entry()(
        event_number in "[0-9]{1,3}[A-Z]?",
        stroke in prop::sample::select(Stroke::ALL.to_vec()),
        distance in 0..10_000u32,
        gender in gender(),
        fee_cents in 0..10_000u32,
        conversion in time(1_000_000),
        seed_1 in time(60_000),
        seed_2 in time(60_000),
        result in prop::option::of(arb_result()),
    ) -> IndividualEntry {
        let mut entry = IndividualEntry::new(event_number, stroke, distance);
        entry.gender = gender;
        entry.gender1 = gender;
        entry.event_fee = fee_cents as f32 / 100.0;
        entry.conversion_seed_time_1 = conversion;
        entry.seed_time_1 = seed_1;
        entry.seed_time_2 = seed_2;
        entry.result = result;
        entry
    }
}

prop_compose! {
    fn arb_team()(
        abbr in "[A-Z]{1,5}",
        name in "[A-Za-z]{0,30}",
        city in prop::option::of("[A-Za-z]{0,30}"),
        swimmers in prop::collection::vec(
            (arb_swimmer_info(), prop::collection::vec(arb_entry(), 0..4))
                .prop_map(|(info, entries)| Swimmer { info, entries }),
            0..4,
        ),
    ) -> Team {
        Team {
            name: Some(TeamName { abbr, name, ..TeamName::default() }),
            address: city.map(|city| TeamAddress { city, ..TeamAddress::default() }),
            contact: None,
            swimmers,
        }
    }
}

prop_compose! {
    fn arb_document()(
        meet_name in prop::option::of("[A-Za-z]{1,45}"),
        teams in prop::collection::vec(arb_team(), 0..3),
    ) -> Hy3Document {
        Hy3Document {
            meet_info: meet_name.map(|name| MeetInfo { name, ..MeetInfo::default() }),
            teams,
            ..Hy3Document::default()
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_document_roundtrip(doc in arb_document()) {
        prop_assert_eq!(roundtrip(&doc), doc);
    }

    #[test]
    fn prop_encoded_lines_are_sealed(doc in arb_document()) {
        let bytes = encode_hy3(&doc).unwrap();
        prop_assert_eq!(bytes.len() % 132, 0);
        for line in bytes.chunks(132) {
            prop_assert_eq!(verify_line(line), Some(true));
        }
    }
}
