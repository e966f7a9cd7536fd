use microcuenca_models::tracking::TrackingId;
use microcuenca_shared_contracts::{time::TimeService, tracking::TrackingIdService};
use rand::{distributions::Uniform, prelude::Distribution, thread_rng, Rng};

#[derive(Debug, Clone, Copy)]
pub struct TrackingIdServiceImpl<Time> {
    time: Time,
}

impl<Time> TrackingIdServiceImpl<Time> {
    pub fn new(time: Time) -> Self {
        Self { time }
    }
}

impl<Time> TrackingIdService for TrackingIdServiceImpl<Time>
where
    Time: TimeService,
{
    #[tracing::instrument(level = "trace", skip(self))]
    fn generate(&self) -> TrackingId {
        let suffix = generate_suffix(thread_rng());
        TrackingId::new(self.time.now(), &suffix).unwrap()
    }
}

fn generate_suffix(rng: impl Rng) -> String {
    suffix_alphabet()
        .sample_iter(rng)
        .take(TrackingId::SUFFIX_LENGTH)
        .collect()
}

fn suffix_alphabet() -> impl Distribution<char> {
    let alphabet = TrackingId::SUFFIX_ALPHABET;
    Uniform::new(0, alphabet.len()).map(|i| alphabet[i] as char)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{TimeZone, Utc};
    use microcuenca_models::tracking::TRACKING_ID_REGEX;
    use microcuenca_shared_contracts::time::MockTimeService;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::time::TimeServiceImpl;

    #[test]
    fn generate() {
        // Arrange
        let now = Utc.timestamp_millis_opt(1760904300123).unwrap();
        let time = MockTimeService::new().with_now(now);

        let sut = TrackingIdServiceImpl { time };

        // Act
        let result = sut.generate();

        // Assert
        assert!(result.starts_with("MC_1760904300123_"));
        assert_eq!(result.len(), "MC_1760904300123_".len() + 9);
        assert!(TRACKING_ID_REGEX.is_match(&result));
    }

    #[test]
    fn distinct() {
        // Arrange
        let sut = TrackingIdServiceImpl {
            time: TimeServiceImpl,
        };

        // Act
        let ids = (0..1000).map(|_| sut.generate()).collect::<HashSet<_>>();

        // Assert
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn suffix_alphabet() {
        let suffix = generate_suffix(thread_rng());
        assert_eq!(suffix.len(), 9);
        assert!(suffix
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9')));
    }
}
