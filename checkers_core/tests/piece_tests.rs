#[cfg(test)]
mod tests {
    use checkers_core::logic::piece::{Piece, NEUTRAL, PLAYER_ONE, PLAYER_TWO};

    #[test]
    fn test_out_of_range_then_valid_owner() {
        let mut p = Piece::new(5);
        assert_eq!(p.owner(), NEUTRAL);

        p.set_owner(1);
        assert_eq!(p.owner(), PLAYER_ONE);

        p.set_king(true);
        assert!(p.is_king());
    }

    #[test]
    fn test_serialize_shape() {
        let mut p = Piece::new(2);
        p.set_king(true);
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json, serde_json::json!({ "owner": 2, "king": true }));
    }

    #[test]
    fn test_deserialize_round_trip() {
        let mut p = Piece::new(1);
        p.set_king(true);
        let text = serde_json::to_string(&p).unwrap();
        let back: Piece = serde_json::from_str(&text).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_deserialize_clamps_owner() {
        let p: Piece = serde_json::from_str(r#"{ "owner": 7, "king": true }"#).unwrap();
        assert_eq!(p.owner(), NEUTRAL);
        assert!(p.is_king());

        let p: Piece = serde_json::from_str(r#"{ "owner": -1 }"#).unwrap();
        assert_eq!(p.owner(), NEUTRAL);
        assert!(!p.is_king());

        let p: Piece = serde_json::from_str(r#"{ "owner": 1.5 }"#).unwrap();
        assert_eq!(p.owner(), NEUTRAL);

        let p: Piece = serde_json::from_str(r#"{ "owner": 2.0 }"#).unwrap();
        assert_eq!(p.owner(), PLAYER_TWO);
    }

    #[test]
    fn test_deserialize_rejects_non_numeric_owner() {
        assert!(serde_json::from_str::<Piece>(r#"{ "owner": "red" }"#).is_err());
    }
}
