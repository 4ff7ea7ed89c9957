//! Port for minting member identifiers.

use uuid::Uuid;

use crate::domain::MemberId;

/// Source of fresh member identifiers.
///
/// Identifiers must be unique without coordination and sort by creation
/// time.
#[cfg_attr(test, mockall::automock)]
pub trait MemberIdGenerator: Send + Sync {
    /// Mint a new identifier.
    fn next_id(&self) -> MemberId;
}

/// UUIDv7 generator: 48-bit millisecond timestamp followed by random bits.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidV7MemberIdGenerator;

impl MemberIdGenerator for UuidV7MemberIdGenerator {
    fn next_id(&self) -> MemberId {
        MemberId::from_uuid(Uuid::now_v7())
    }
}

/// Fixture generator returning the same identifier every time.
#[derive(Debug, Clone, Copy)]
pub struct FixtureMemberIdGenerator(pub MemberId);

impl MemberIdGenerator for FixtureMemberIdGenerator {
    fn next_id(&self) -> MemberId {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn uuid_v7_ids_do_not_collide() {
        let generator = UuidV7MemberIdGenerator;
        let ids: HashSet<MemberId> = (0..10_000).map(|_| generator.next_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[rstest]
    fn uuid_v7_ids_carry_version_seven() {
        let id = UuidV7MemberIdGenerator.next_id();
        assert_eq!(id.as_uuid().get_version_num(), 7);
    }

    #[tokio::test]
    async fn later_ids_sort_after_earlier_ones() {
        let generator = UuidV7MemberIdGenerator;
        let earlier = generator.next_id();
        tokio::time::sleep(Duration::from_millis(2)).await;
        let later = generator.next_id();
        assert!(earlier < later);
        assert!(earlier.to_string() < later.to_string());
    }
}
