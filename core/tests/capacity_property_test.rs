//! Property tests for capacity accounting.
//!
//! Random sequences of bookings against a small catalog must never push a
//! class/day count past capacity, and every admission must report exactly
//! the slots left afterwards.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use proptest::prelude::*;
use std::collections::HashMap;
use studio_booking_core::{ClassDate, ErrorKind};
use studio_booking_testing::helpers::{booking_request, class_request, TestHarness};

const CLASSES: [(&str, &str, &str); 3] = [
    ("Pilates", "01-12-2024", "05-12-2024"),
    ("Yoga", "03-12-2024", "08-12-2024"),
    ("Spin", "01-12-2024", "01-12-2024"),
];

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("test runtime")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_count_never_exceeds_capacity(
        capacities in prop::array::uniform3(1i64..4),
        attempts in prop::collection::vec((0usize..3, 1u32..=9), 0..40),
    ) {
        let outcome: Result<(), TestCaseError> = runtime().block_on(async {
            let harness = TestHarness::new();
            for ((name, start, end), capacity) in CLASSES.iter().zip(capacities) {
                harness
                    .controller
                    .register_class(class_request(name, start, end, capacity))
                    .await
                    .unwrap();
            }

            let mut expected: HashMap<(usize, u32), u32> = HashMap::new();

            for (i, (class, day)) in attempts.iter().copied().enumerate() {
                let (name, start, end) = CLASSES[class];
                let date = format!("{day:02}-12-2024");
                let result = harness
                    .controller
                    .create_booking(booking_request(&format!("Member {i}"), &date, name))
                    .await;

                let parsed = ClassDate::parse(&date).unwrap();
                let in_range = !parsed.is_before(&ClassDate::parse(start).unwrap())
                    && !parsed.is_after(&ClassDate::parse(end).unwrap());
                let capacity = u32::try_from(capacities[class]).unwrap();
                let taken = expected.entry((class, day)).or_insert(0);

                match result {
                    Ok(admission) => {
                        prop_assert!(in_range);
                        prop_assert!(*taken < capacity);
                        *taken += 1;
                        prop_assert_eq!(admission.available_slots, capacity - *taken);
                    }
                    Err(err) if !in_range => {
                        prop_assert_eq!(err.kind(), ErrorKind::ClassUnavailable);
                    }
                    Err(err) => {
                        prop_assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
                        prop_assert_eq!(*taken, capacity);
                    }
                }
            }

            for ((class, day), taken) in &expected {
                let date = ClassDate::parse(&format!("{day:02}-12-2024")).unwrap();
                let counted = harness.controller.count_for(CLASSES[*class].0, &date).await;
                prop_assert_eq!(counted, *taken as usize);
            }

            let admitted: u32 = expected.values().sum();
            prop_assert_eq!(harness.controller.booking_count().await, admitted as usize);
            Ok(())
        });
        outcome?;
    }

    #[test]
    fn prop_valid_dates_round_trip(day in 1u32..=28, month in 1u32..=12, year in 1000u32..=9999) {
        let text = format!("{day:02}-{month:02}-{year:04}");
        let date = ClassDate::parse(&text).unwrap();
        prop_assert_eq!(date.to_string(), text);
    }

    #[test]
    fn prop_non_layout_text_is_rejected(text in "[0-9/ .]{0,12}") {
        prop_assert!(ClassDate::parse(&text).is_err());
    }
}
