// tests/interactive.rs
use mars_rover::{Coordinate, InputAction, Plateau, RoverError};

#[test]
fn test_keys_without_a_rover_are_ignored() {
    let mut plateau = Plateau::new(Coordinate::new(5.0, 5.0));
    for key in ["m", "l", "ArrowRight"] {
        plateau.handle_key(key).unwrap();
    }
    assert!(plateau.rovers().is_empty());
}

#[test]
fn test_new_rover_starts_at_origin_facing_north() {
    let mut plateau = Plateau::new(Coordinate::new(5.0, 5.0));
    plateau.handle_input(InputAction::NewRover).unwrap();
    assert_eq!(plateau.active_rover().unwrap().to_string(), "0 0 N");
}

#[test]
fn test_keys_drive_only_the_active_rover() {
    let mut plateau = Plateau::new(Coordinate::new(5.0, 5.0));
    for key in ["n", "ArrowUp", "r", "m"] {
        plateau.handle_key(key).unwrap();
    }
    assert_eq!(plateau.active_rover().unwrap().to_string(), "1 1 E");

    for key in ["N", "M", "M", "L", "Enter", "x"] {
        plateau.handle_key(key).unwrap();
    }
    let labels: Vec<String> = plateau.rovers().iter().map(|r| r.to_string()).collect();
    assert_eq!(labels, ["1 1 E", "0 2 W"]);
}

#[test]
fn test_crashed_active_rover_rejects_moves() {
    let mut plateau = Plateau::new(Coordinate::ORIGIN);
    plateau.handle_key("n").unwrap();
    plateau.handle_key("m").unwrap();
    assert!(plateau.active_rover().unwrap().is_crashed());

    let err = plateau.handle_key("m").unwrap_err();
    assert!(matches!(err, RoverError::CrashedRoverCommand { rover: 0, .. }));
    assert_eq!(
        plateau.active_rover().unwrap().to_string(),
        "Crashed at 0 1 N"
    );
}
