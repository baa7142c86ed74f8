//! End-to-end tests for document extraction

#[cfg(test)]
mod tests {
    use crate::{parse_document, Extractor, LoadError};
    use chronicle_domain::Category;
    use chrono::NaiveDate;

    const DOCUMENT: &str = r#"[
        {
            "chunk_id": "c1",
            "page": 5,
            "part_title": "Part I",
            "chapter_title": "Background",
            "section_title": "1990-1992",
            "model_output": {
                "events": [
                    {"date": "1990-03-01", "label": "Clash", "description": "Fighting near the border", "actors": ["Militia"]},
                    {"date": "unknown", "label": "Undated rumour", "actors": []}
                ],
                "testimonies": [
                    {"date": "1991-07-12", "witness": "J. Doe", "excerpt": "...", "location": "Tbilisi"}
                ]
            }
        },
        {
            "chunk_id": "c2",
            "page": 9,
            "model_output": {
                "violations": [
                    {"date": "1989-11-23", "description": "Detention of civilians", "party": ["Police", "Army"]}
                ],
                "events": [
                    {"label": "No date at all"}
                ]
            }
        }
    ]"#;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_full_document_flow() {
        let result = Extractor::default().extract_document(DOCUMENT).unwrap();

        let labels: Vec<&str> = result.records.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Clash", "Testimony - J. Doe", "Detention of civilians"],
            "chunk order then declaration order, no date sorting"
        );

        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.metadata.chunks, 2);
        assert_eq!(result.metadata.entries_dated, 4);
        assert_eq!(result.metadata.entries_undated, 1);
    }

    #[test]
    fn test_provenance_copied() {
        let result = Extractor::default().extract_document(DOCUMENT).unwrap();
        let clash = &result.records[0];
        assert_eq!(clash.provenance.chunk_id.as_deref(), Some("c1"));
        assert_eq!(clash.provenance.page, Some(5));
        assert_eq!(clash.provenance.part_title.as_deref(), Some("Part I"));
        assert_eq!(clash.provenance.chapter_title.as_deref(), Some("Background"));
        assert_eq!(clash.provenance.section_title.as_deref(), Some("1990-1992"));

        let detention = &result.records[2];
        assert_eq!(detention.provenance.page, Some(9));
        assert_eq!(detention.provenance.part_title, None);
        assert_eq!(detention.actors.as_deref(), Some("Police, Army"));
        assert_eq!(detention.date, date("1989-11-23"));
    }

    #[test]
    fn test_category_field_invariants() {
        let result = Extractor::default().extract_document(DOCUMENT).unwrap();
        for record in &result.records {
            match record.category {
                Category::Event | Category::Violation => {
                    assert!(record.witness.is_none());
                    assert!(record.location.is_none());
                }
                Category::Testimony => {
                    assert!(record.actors.is_none());
                }
            }
        }
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let extractor = Extractor::default();
        let chunks = parse_document(DOCUMENT).unwrap();
        let first = extractor.extract(&chunks);
        let second = extractor.extract(&chunks);
        assert_eq!(first.records, second.records);
        assert_eq!(first.skipped, second.skipped);
    }

    #[test]
    fn test_unknown_date_absent() {
        let result = Extractor::default().extract_document(DOCUMENT).unwrap();
        assert!(result.records.iter().all(|r| r.label != "Undated rumour"));
        assert_eq!(result.skipped[0].raw_date, "unknown");
        assert_eq!(result.skipped[0].category, Category::Event);
    }

    #[test]
    fn test_malformed_top_level_is_load_error() {
        let extractor = Extractor::default();
        assert!(matches!(
            extractor.extract_document("\"chunks\""),
            Err(LoadError::InvalidFormat(_))
        ));
        assert!(matches!(
            extractor.extract_document("[{\"chunk_id\": "),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn test_month_year_dates_anchor_to_first_of_month() {
        let json = r#"[{"page": 2, "model_output": {"events": [
            {"date": "March 1990", "label": "Clash"},
            {"date": "August 2008", "label": "War"}
        ]}}]"#;
        let result = Extractor::default().extract_document(json).unwrap();
        let dates: Vec<(String, NaiveDate)> = result
            .records
            .into_iter()
            .map(|r| (r.label, r.date))
            .collect();
        assert_eq!(
            dates,
            vec![
                ("Clash".to_string(), NaiveDate::from_ymd_opt(1990, 3, 1).unwrap()),
                ("War".to_string(), NaiveDate::from_ymd_opt(2008, 8, 1).unwrap()),
            ]
        );
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_empty_document() {
        let result = Extractor::default().extract_document("[]").unwrap();
        assert!(result.records.is_empty());
        assert!(result.skipped.is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use crate::{
        extract, ActorField, EventSource, SourceChunk, SourceEntry, TestimonySource,
        ViolationSource,
    };
    use chronicle_domain::Category;
    use proptest::prelude::*;

    fn arb_raw_date() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some("unknown".to_string())),
            (1950i32..2030, 1u32..=12, 1u32..=28)
                .prop_map(|(y, m, d)| Some(format!("{:04}-{:02}-{:02}", y, m, d))),
        ]
    }

    fn arb_entry() -> impl Strategy<Value = SourceEntry> {
        prop_oneof![
            (arb_raw_date(), prop::collection::vec("[A-Z][a-z]{0,6}", 0..3)).prop_map(
                |(date, actors)| SourceEntry::Event(EventSource {
                    date,
                    label: Some("e".to_string()),
                    description: None,
                    actors,
                })
            ),
            arb_raw_date().prop_map(|date| SourceEntry::Testimony(TestimonySource {
                date,
                witness: Some("w".to_string()),
                ..Default::default()
            })),
            (arb_raw_date(), arb_actor_field(), arb_actor_field()).prop_map(
                |(date, actors, party)| SourceEntry::Violation(ViolationSource {
                    date,
                    label: Some("v".to_string()),
                    description: None,
                    actors,
                    party,
                })
            ),
        ]
    }

    fn arb_actor_field() -> impl Strategy<Value = Option<ActorField>> {
        prop_oneof![
            Just(None),
            prop::collection::vec("[A-Z][a-z]{0,6}", 0..3)
                .prop_map(|names| Some(ActorField::List(names))),
            "([A-Z][a-z]{0,6})?".prop_map(|text| Some(ActorField::Text(text))),
        ]
    }

    fn is_extracted(entry: &SourceEntry) -> bool {
        entry.raw_date().is_some_and(|d| d != "unknown")
    }

    fn arb_chunks() -> impl Strategy<Value = Vec<SourceChunk>> {
        prop::collection::vec(
            prop::collection::vec(arb_entry(), 0..5).prop_map(|entries| SourceChunk {
                entries,
                ..Default::default()
            }),
            0..5,
        )
    }

    proptest! {
        /// Property: testimonies never carry actors, events always do
        #[test]
        fn test_actor_presence_by_category(chunks in arb_chunks()) {
            for record in extract(&chunks) {
                match record.category {
                    Category::Testimony => prop_assert!(record.actors.is_none()),
                    Category::Event => prop_assert!(record.actors.is_some()),
                    Category::Violation => {}
                }
            }
        }

        /// Property: violation actors come from `actors` when it is non-empty, else `party`
        #[test]
        fn test_violation_actor_precedence(chunks in arb_chunks()) {
            let entries = chunks.iter().flat_map(|c| &c.entries).filter(|e| is_extracted(e));
            for (entry, record) in entries.zip(extract(&chunks)) {
                prop_assert_eq!(entry.category(), record.category);
                if let SourceEntry::Violation(v) = entry {
                    let expected = match (&v.actors, &v.party) {
                        (Some(actors), _) if !actors.is_empty() => Some(actors.to_display()),
                        (_, Some(party)) => Some(party.to_display()),
                        _ => None,
                    };
                    prop_assert_eq!(&record.actors, &expected);
                }
            }
        }

        /// Property: re-running extraction yields the identical sequence
        #[test]
        fn test_extract_deterministic(chunks in arb_chunks()) {
            prop_assert_eq!(extract(&chunks), extract(&chunks));
        }

        /// Property: one record per entry with a parseable date
        #[test]
        fn test_record_count_matches_parseable_entries(chunks in arb_chunks()) {
            let expected = chunks
                .iter()
                .flat_map(|c| &c.entries)
                .filter(|e| is_extracted(e))
                .count();
            prop_assert_eq!(extract(&chunks).len(), expected);
        }
    }
}
