//! Steering robots back into play when they touch a painted line.
//!
//! Recovery runs after all role programs and overrides their travel command
//! for the tick. A robot touching nothing keeps its command unchanged.

use cup_core::{
    bearing_of, relative_vector, FieldGeometry, LineContact, RecoveryMode, RigidBodyWorld,
    RobotState, Vector2,
};

/// Fraction of the commanded speed kept while heading back in
const CENTER_SEEK_SPEED_FACTOR: f64 = 0.9;
const TOF_ESCAPE_SPEED: f64 = 450.0;
/// A wall closer than this on one side pushes the escape the other way
const TOF_NEAR_WALL: f64 = 120.0;

/// Run the configured recovery for one robot. `front` marks the own robot
/// currently attacking.
pub fn recover<W: RigidBodyWorld + ?Sized>(
    mode: RecoveryMode,
    robot: &mut RobotState,
    front: bool,
    world: &W,
    field: &FieldGeometry,
) {
    match mode {
        RecoveryMode::CenterSeek => {
            let contacts = world.line_contacts(robot.slot);
            center_seek(robot, front, &contacts, field);
        }
        RecoveryMode::TofEscape => {
            let line = world.detect_line_contact(robot.slot);
            tof_escape(robot, line);
        }
    }
}

/// Classify each contact by where it happened and head for the middle of the
/// field. Touching a penalty arc only marks the `front` robot as out, and does
/// not steer it.
pub fn center_seek(
    robot: &mut RobotState,
    front: bool,
    contacts: &[LineContact],
    field: &FieldGeometry,
) {
    let speed = robot.commanded_speed * CENTER_SEEK_SPEED_FACTOR;

    for contact in contacts {
        if contact.penalty_disk {
            if front {
                robot.out_of_bounds = true;
            }
            continue;
        }

        let side = contact.min_x() < field.out_x_min || contact.max_x() > field.out_x_max;
        let end = contact.min_y() < field.out_y_min || contact.max_y() > field.out_y_max;
        let target = match (side, end) {
            (true, false) => Vector2::new(field.width / 2.0, robot.position.y),
            (_, true) => field.center(),
            (false, false) => continue,
        };

        robot.out_of_bounds = true;
        let bearing = bearing_of(&relative_vector(robot.position, robot.orientation, target));
        log::trace!("p{} touches {}, heading in", robot.slot, contact.shape);
        robot.move_towards(speed, bearing.radians() + robot.orientation.radians());
    }
}

/// Move away from the touched lines along the summed contact direction,
/// using the wall distances to pick which way is open.
///
/// `line` points from the robot towards the lines it touches, as returned by
/// [`RigidBodyWorld::detect_line_contact`].
pub fn tof_escape(robot: &mut RobotState, line: Vector2) {
    let tof = robot.tof;
    let x = if line.x == 0.0 {
        0.0
    } else if (tof.right > tof.left && tof.left < TOF_NEAR_WALL) || tof.right > TOF_NEAR_WALL {
        line.x.abs()
    } else {
        -line.x.abs()
    };
    let y = if line.y == 0.0 {
        0.0
    } else if tof.top > tof.bottom {
        line.y.abs()
    } else {
        -line.y.abs()
    };

    let escape = Vector2::new(x, y);
    if escape != Vector2::zeros() {
        robot.out_of_bounds = true;
        robot.move_towards(TOF_ESCAPE_SPEED, bearing_of(&escape).radians());
    }
}
