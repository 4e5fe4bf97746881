//! Contact tests between a robot and the painted field markings.
//!
//! The markings are not colliders: robots drive over them, so contacts are
//! found geometrically from the robot's position every time they are asked
//! for.

use cup_core::{
    closest_point_on_segment, FieldDisk, FieldGeometry, FieldLineSegment, LineContact, Vector2,
};

/// Every boundary line, penalty line and penalty disk a robot of the given
/// radius centred at `center` overlaps.
pub fn line_contacts(field: &FieldGeometry, center: Vector2, radius: f64) -> Vec<LineContact> {
    let segments = field
        .boundary_lines()
        .into_iter()
        .chain(field.penalty_lines())
        .filter_map(|line| segment_contact(&line, center, radius));
    let disks = field
        .penalty_disks()
        .into_iter()
        .filter_map(|disk| disk_contact(&disk, center, radius));
    segments.chain(disks).collect()
}

fn segment_contact(line: &FieldLineSegment, center: Vector2, radius: f64) -> Option<LineContact> {
    let closest = closest_point_on_segment(center, line.p1, line.p2);
    let offset = center - closest;
    let distance = offset.norm();
    if distance >= radius + line.half_thickness {
        return None;
    }

    let normal = if distance > 0.0 {
        offset / distance
    } else {
        // Centre exactly on the line: use the line's own normal
        let along = line.p2 - line.p1;
        Vector2::new(-along.y, along.x).normalize()
    };
    Some(LineContact {
        shape: line.name.clone(),
        point_on_line: closest + normal * line.half_thickness,
        point_on_robot: center - normal * radius,
        normal,
        penalty_disk: false,
    })
}

fn disk_contact(disk: &FieldDisk, center: Vector2, radius: f64) -> Option<LineContact> {
    let offset = center - disk.center;
    let distance = offset.norm();
    if distance >= disk.radius + radius {
        return None;
    }

    let normal = if distance > 0.0 {
        offset / distance
    } else {
        Vector2::y()
    };
    Some(LineContact {
        shape: disk.name.clone(),
        point_on_line: disk.center + normal * disk.radius,
        point_on_robot: center - normal * radius,
        normal,
        penalty_disk: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RADIUS: f64 = 15.0;

    #[test]
    fn test_robot_in_open_field_touches_nothing() {
        let field = FieldGeometry::default();
        assert!(line_contacts(&field, field.center(), RADIUS).is_empty());
    }

    #[test]
    fn test_robot_over_left_line() {
        let field = FieldGeometry::default();
        let contacts = line_contacts(&field, Vector2::new(70.0, 300.0), RADIUS);
        assert_eq!(contacts.len(), 1);

        let contact = &contacts[0];
        assert_eq!(contact.shape, "left_line");
        assert_relative_eq!(contact.normal, Vector2::new(-1.0, 0.0));
        assert_relative_eq!(contact.point_on_line, Vector2::new(73.0, 300.0));
        assert_relative_eq!(contact.point_on_robot, Vector2::new(85.0, 300.0));
        assert!(contact.min_x() < field.out_x_min);
    }

    #[test]
    fn test_robot_in_penalty_disk() {
        let field = FieldGeometry::default();
        let contacts = line_contacts(&field, Vector2::new(210.0, 160.0), RADIUS);
        assert!(contacts
            .iter()
            .any(|c| c.penalty_disk && c.shape == "own_penalty_arc_left"));
    }

    #[test]
    fn test_corner_touches_two_lines() {
        let field = FieldGeometry::default();
        let contacts = line_contacts(&field, Vector2::new(80.0, 80.0), RADIUS);
        let names: Vec<_> = contacts.iter().map(|c| c.shape.as_str()).collect();
        assert!(names.contains(&"left_line"));
        assert!(names.contains(&"bottom_line"));
    }
}
