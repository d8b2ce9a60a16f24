// tests/missions.rs
use std::cell::RefCell;
use std::rc::Rc;

use mars_rover::{
    Coordinate, MissionPlan, Plateau, PlateauConfig, PlateauEvent, RoverChange, RoverError,
};

const CLASSIC: &str = "5 5\n1 2 N\nLMLMLMLMM\n3 3 E\nMMRMMRMRRM\n";

fn labels(plateau: &Plateau) -> Vec<String> {
    plateau.rovers().iter().map(|r| r.to_string()).collect()
}

#[test]
fn test_classic_mission() {
    env_logger::try_init().ok();
    let mut plateau = Plateau::default();

    let rovers = plateau.execute(CLASSIC).unwrap();

    assert_eq!(rovers.len(), 2);
    assert_eq!(rovers[0].to_string(), "1 3 N");
    assert_eq!(rovers[1].to_string(), "5 1 E");
    assert_eq!(plateau.size(), Coordinate::new(5.0, 5.0));
}

#[test]
fn test_classic_mission_is_frame_independent() {
    // Spreading every step over several ticks changes pacing, not outcome.
    let config = PlateauConfig {
        frames_per_step: 7,
        ..Default::default()
    };
    let mut plateau = Plateau::with_config(Coordinate::ORIGIN, config);
    plateau.execute(CLASSIC).unwrap();
    assert_eq!(labels(&plateau), ["1 3 N", "5 1 E"]);
}

#[test]
fn test_one_crash_does_not_stop_the_others() {
    let mission = "3 3\n0 0 N\nMM\n3 3 N\nMLMRM\n1 1 e\nmmlm\n";
    let mut plateau = Plateau::default();

    plateau.execute(mission).unwrap();

    assert_eq!(
        labels(&plateau),
        ["0 2 N", "Crashed at 3 4 N", "3 2 N"]
    );
}

#[test]
fn test_bad_position_line_skips_only_that_rover() {
    let mission = "5 5\n1 2 X\nMMM\n2 2 S\nM\n";
    let mut plateau = Plateau::default();

    let rovers = plateau.execute(mission).unwrap();

    assert_eq!(rovers.len(), 1);
    assert_eq!(rovers[0].to_string(), "2 1 S");
}

#[test]
fn test_malformed_mission_changes_nothing() {
    let mut plateau = Plateau::new(Coordinate::new(2.0, 2.0));
    for mission in ["", "5\n1 2 N\nM", "5 5\n1 2 N"] {
        assert!(matches!(
            plateau.execute(mission),
            Err(RoverError::MalformedMission(_))
        ));
    }
    assert!(plateau.rovers().is_empty());
    assert_eq!(plateau.size(), Coordinate::new(2.0, 2.0));
}

#[test]
fn test_leaving_the_low_edges_is_not_a_crash() {
    // Only the far edges are checked; negative coordinates stay uncrashed.
    let mut plateau = Plateau::default();
    plateau.execute("2 2\n0 0 S\nMMRMM\n").unwrap();
    assert_eq!(labels(&plateau), ["-2 -2 W"]);
    assert!(!plateau.rovers()[0].is_crashed());
}

#[test]
fn test_rovers_accumulate_until_cleared() {
    let mut plateau = Plateau::default();
    plateau.execute("5 5\n0 0 N\nM\n").unwrap();
    plateau.execute("5 5\n1 1 E\nM\n").unwrap();
    assert_eq!(labels(&plateau), ["0 1 N", "2 1 E"]);

    plateau.clear();
    plateau.execute("5 5\n3 3 W\nM\n").unwrap();
    assert_eq!(labels(&plateau), ["2 3 W"]);
    assert_eq!(plateau.rovers()[0].id(), 0);
}

#[test]
fn test_rovers_progress_side_by_side() {
    let config = PlateauConfig {
        frames_per_step: 2,
        ..Default::default()
    };
    let mut plateau = Plateau::with_config(Coordinate::ORIGIN, config);
    let plan: MissionPlan = "4 4\n0 0 N\nM\n2 0 E\nM\n".parse().unwrap();

    let mut run = plateau.launch(&plan);
    assert!(run.tick(&mut plateau));
    let rovers = plateau.rovers();
    assert!(rovers[0].is_moving() && rovers[1].is_moving());
    assert_eq!(rovers[0].position(), Coordinate::new(0.0, 0.5));
    assert_eq!(rovers[1].position(), Coordinate::new(2.5, 0.0));

    assert!(!run.tick(&mut plateau));
    assert!(run.is_finished());
    assert_eq!(run.ticks(), 2);
    assert_eq!(labels(&plateau), ["0 1 N", "3 0 E"]);
}

#[test]
fn test_each_rover_runs_its_commands_in_order() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut plateau = Plateau::default();
    let sink = Rc::clone(&events);
    plateau.add_observer(move |event: &PlateauEvent| {
        if let PlateauEvent::RoverChanged { rover, change } = event {
            sink.borrow_mut().push((*rover, *change));
        }
    });

    plateau.execute("5 5\n0 0 N\nRM\n4 4 S\nM\n").unwrap();

    let events = events.borrow();
    let first: Vec<RoverChange> = events
        .iter()
        .filter(|(rover, _)| *rover == 0)
        .map(|(_, change)| *change)
        .collect();
    assert_eq!(
        first,
        [
            RoverChange::Moving(true),
            RoverChange::Heading(90.0),
            RoverChange::Moving(false),
            RoverChange::Moving(true),
            RoverChange::Position(Coordinate::new(1.0, 0.0)),
            RoverChange::Moving(false),
        ]
    );
    // The second rover's only step lands between the first rover's two steps.
    assert_eq!(events[3].0, 1);
}

#[test]
fn test_failed_rovers_are_reported() {
    let mut plateau = Plateau::default();
    let plan: MissionPlan = "1 1\n1 1 N\nMM\n0 0 E\nM\n".parse().unwrap();

    let mut run = plateau.launch(&plan);
    run.run_to_end(&mut plateau);

    assert_eq!(run.failures(), [0]);
    assert_eq!(labels(&plateau), ["Crashed at 1 2 N", "1 0 E"]);
}

#[test]
fn test_parse_rover_command_set_matches_execute() {
    let mut plateau = Plateau::new(Coordinate::new(5.0, 5.0));
    plateau.parse_rover_command_set("1 2 N", "LMLMLMLMM");
    plateau.parse_rover_command_set("3 3 E", "MMRMMRMRRM");
    assert_eq!(labels(&plateau), ["1 3 N", "5 1 E"]);
}

#[test]
fn test_clear_stops_runs_launched_before_it() {
    let config = PlateauConfig {
        frames_per_step: 2,
        ..Default::default()
    };
    let mut plateau = Plateau::with_config(Coordinate::ORIGIN, config);
    let plan: MissionPlan = "5 5\n0 0 N\nMMMM\n".parse().unwrap();

    let mut run = plateau.launch(&plan);
    assert!(run.tick(&mut plateau));
    plateau.clear();
    let id = plateau.create_rover(3.0, 3.0, "E").unwrap().id();
    run.run_to_end(&mut plateau);

    assert_eq!(id, 0);
    assert_eq!(run.failures(), [0]);
    assert!(run.is_finished());
    assert_eq!(labels(&plateau), ["3 3 E"]);
}

#[test]
fn test_trailing_blank_line_after_mission() {
    let mut plateau = Plateau::default();
    plateau.execute("5 5\n1 2 N\nLMLMLMLMM\n\n").unwrap();
    assert_eq!(labels(&plateau), ["1 3 N"]);
}
