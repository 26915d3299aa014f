//! Unit tests for roadmap-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CityId, RoadId, TrunkId};

    #[test]
    fn index_roundtrip() {
        let id = CityId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(CityId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(CityId(0) < CityId(1));
        assert!(RoadId(100) > RoadId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(CityId::INVALID.0, u32::MAX);
        assert_eq!(RoadId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(CityId(7).to_string(), "CityId(7)");
    }

    #[test]
    fn trunk_id_bounds() {
        assert!(TrunkId::new(0).is_none());
        assert!(TrunkId::new(1).is_some());
        assert!(TrunkId::new(999).is_some());
        assert!(TrunkId::new(1000).is_none());
    }

    #[test]
    fn trunk_id_slot_index() {
        assert_eq!(TrunkId::new(1).unwrap().slot_index(), 0);
        assert_eq!(TrunkId::new(999).unwrap().slot_index(), 998);
    }
}
