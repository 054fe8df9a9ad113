//! Generated listing used when no listing file is given.

use chrono::{Duration, NaiveDateTime, Timelike};
use tvguide_core::Listing;
use tvguide_core::source::{ListingChannel, ListingProgram};

const CHANNELS: [&str; 20] = [
    "Das Erste", "ZDF", "Arte", "3sat", "Phoenix", "KiKA", "One", "ZDFneo",
    "ZDFinfo", "tagesschau24", "BR", "HR", "MDR", "NDR", "RBB", "SR", "SWR",
    "WDR", "ORF 1", "SRF 1",
];

const SHOWS: [(&str, i64); 8] = [
    ("News", 15),
    ("Weather", 5),
    ("Documentary", 45),
    ("Feature Film", 105),
    ("Quiz Show", 30),
    ("Talk", 60),
    ("Series", 50),
    ("Sports", 90),
];

/// Twenty channels with programs of varied length from three hours before
/// `now` to twelve hours after. Every other channel has a stream.
pub fn listing(now: NaiveDateTime) -> Listing {
    let hour = now
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now);
    let from = hour - Duration::hours(3);
    let until = hour + Duration::hours(12);

    let channels = CHANNELS
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let mut programs = Vec::new();
            let mut start = from;
            let mut slot = i;
            while start < until {
                let (show, minutes) = SHOWS[slot % SHOWS.len()];
                let end = start + Duration::minutes(minutes);
                programs.push(ListingProgram {
                    title: format!("{show} {}", programs.len() + 1),
                    description: format!("{show} on {title}"),
                    start,
                    end,
                    image_small: None,
                    image_large: None,
                });
                start = end;
                slot += 3;
            }
            ListingChannel {
                id: format!("ch{i}"),
                title: (*title).to_string(),
                logo: None,
                stream: (i % 2 == 0).then(|| format!("udp://239.0.0.{}:1234", i + 1)),
                programs,
            }
        })
        .collect();

    Listing {
        channel_icons: false,
        channels,
    }
}
