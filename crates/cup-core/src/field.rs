use serde::{Deserialize, Serialize};

use crate::{RobotSlot, Vector2};

/// A straight painted line or goal structure.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FieldLineSegment {
    /// Readable name of the segment
    pub name: String,
    pub p1: Vector2,
    pub p2: Vector2,
    /// Half of the stroke thickness
    pub half_thickness: f64,
}

impl FieldLineSegment {
    pub fn new(name: impl Into<String>, p1: Vector2, p2: Vector2, half_thickness: f64) -> Self {
        Self {
            name: name.into(),
            p1,
            p2,
            half_thickness,
        }
    }
}

/// A filled disk marking the corner of a penalty area.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FieldDisk {
    pub name: String,
    pub center: Vector2,
    pub radius: f64,
}

/// The field geometry, in field units (x to the right, y up, origin bottom left).
///
/// The own side defends the goal at low y and attacks towards high y.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FieldGeometry {
    /// Distance between the side walls
    pub width: f64,
    /// Distance between the end walls
    pub height: f64,
    /// x of the left goal post; the right one is mirrored
    pub goal_post_x: f64,
    /// Distance of the goal mouth line from the end wall
    pub goal_line_inset: f64,
    /// Distance of the goal back from the end wall
    pub goal_back_inset: f64,
    /// Clearance kept from a goalkeeper when picking a goal gap
    pub goal_gap_post_offset: f64,
    /// Distance of the white boundary lines from the walls
    pub line_inset: f64,
    pub line_half_thickness: f64,
    pub penalty_disk_radius: f64,
    /// y the own defender patrols
    pub own_guard_y: f64,
    /// y the opponent defender patrols
    pub opp_guard_y: f64,
    /// Defenders keep their x within [`guard_inset_x`, width − `guard_inset_x`]
    pub guard_inset_x: f64,
    /// Contact points beyond these bounds count as crossing a side line
    pub out_x_min: f64,
    pub out_x_max: f64,
    /// Contact points beyond these bounds count as crossing an end line
    pub out_y_min: f64,
    pub out_y_max: f64,
    /// Distance from the walls where the ball starts rolling back in
    pub slope_margin: f64,
}

impl Default for FieldGeometry {
    fn default() -> Self {
        let width = 546.0;
        let height = 729.0;
        Self {
            width,
            height,
            goal_post_x: 180.0,
            goal_line_inset: 78.0,
            goal_back_inset: 60.0,
            goal_gap_post_offset: 30.0,
            line_inset: 77.0,
            line_half_thickness: 4.0,
            penalty_disk_radius: 40.0,
            own_guard_y: 130.0,
            opp_guard_y: 600.0,
            guard_inset_x: 335.0,
            out_x_min: 74.0,
            out_x_max: width - 74.0,
            out_y_min: 75.0,
            out_y_max: height - 74.0,
            slope_margin: 35.0,
        }
    }
}

impl FieldGeometry {
    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }

    /// y of the goal mouth the own side attacks.
    pub fn far_goal_y(&self) -> f64 {
        self.height - self.goal_line_inset
    }

    /// y of the goal mouth the own side defends.
    pub fn near_goal_y(&self) -> f64 {
        self.goal_line_inset
    }

    /// x of the right goal post.
    pub fn right_post_x(&self) -> f64 {
        self.width - self.goal_post_x
    }

    /// The white rectangle around the playing area.
    pub fn boundary_lines(&self) -> Vec<FieldLineSegment> {
        let (l, r) = (self.line_inset, self.width - self.line_inset);
        let (b, t) = (self.line_inset, self.height - self.line_inset);
        let th = self.line_half_thickness;
        vec![
            FieldLineSegment::new("left_line", Vector2::new(l, b), Vector2::new(l, t), th),
            FieldLineSegment::new("top_line", Vector2::new(l, t), Vector2::new(r, t), th),
            FieldLineSegment::new("right_line", Vector2::new(r, t), Vector2::new(r, b), th),
            FieldLineSegment::new("bottom_line", Vector2::new(r, b), Vector2::new(l, b), th),
        ]
    }

    /// Straight edges of both penalty areas.
    pub fn penalty_lines(&self) -> Vec<FieldLineSegment> {
        let w = self.width;
        let h = self.height;
        let th = self.line_half_thickness;
        let seg = |name: &str, x1: f64, y1: f64, x2: f64, y2: f64| {
            FieldLineSegment::new(name, Vector2::new(x1, y1), Vector2::new(x2, y2), th)
        };
        vec![
            seg("own_penalty_left", 171.0, 77.0, 171.0, 112.0),
            seg("own_penalty_front", 211.0, 152.0, w - 211.0, 152.0),
            seg("own_penalty_right", w - 171.0, 77.0, w - 171.0, 112.0),
            seg("opp_penalty_left", 171.0, h - 77.0, 171.0, h - 112.0),
            seg("opp_penalty_front", 211.0, h - 152.0, w - 211.0, h - 152.0),
            seg("opp_penalty_right", w - 171.0, h - 77.0, w - 171.0, h - 112.0),
        ]
    }

    /// Rounded corners of both penalty areas.
    pub fn penalty_disks(&self) -> Vec<FieldDisk> {
        let w = self.width;
        let h = self.height;
        let r = self.penalty_disk_radius;
        let disk = |name: &str, x: f64, y: f64| FieldDisk {
            name: name.to_string(),
            center: Vector2::new(x, y),
            radius: r,
        };
        vec![
            disk("own_penalty_arc_left", 210.0, 110.0),
            disk("opp_penalty_arc_left", 210.0, h - 110.0),
            disk("own_penalty_arc_right", w - 210.0, 110.0),
            disk("opp_penalty_arc_right", w - 210.0, h - 110.0),
        ]
    }

    /// Solid goal structures. Crossbars stop robots but let the ball through,
    /// the remaining segments stop both.
    pub fn goal_segments(&self) -> Vec<(FieldLineSegment, bool)> {
        let (x1, x2) = (self.goal_post_x, self.right_post_x());
        let mut out = Vec::with_capacity(8);
        for (side, mouth, back) in [
            ("own", self.goal_line_inset, self.goal_back_inset),
            (
                "opp",
                self.height - self.goal_line_inset,
                self.height - self.goal_back_inset,
            ),
        ] {
            let seg = |name: &str, a: Vector2, b: Vector2| {
                FieldLineSegment::new(format!("{side}_{name}"), a, b, 2.0)
            };
            out.push((
                seg("crossbar", Vector2::new(x1, mouth), Vector2::new(x2, mouth)),
                false,
            ));
            out.push((
                seg("goal_back", Vector2::new(x1, back), Vector2::new(x2, back)),
                true,
            ));
            out.push((
                seg("goal_left", Vector2::new(x1, mouth), Vector2::new(x1, back)),
                true,
            ));
            out.push((
                seg("goal_right", Vector2::new(x2, mouth), Vector2::new(x2, back)),
                true,
            ));
        }
        out
    }

    /// Kickoff position and raw body angle of a robot.
    pub fn start_pose(&self, slot: RobotSlot) -> (Vector2, f64) {
        let x = self.width / 2.0;
        match slot {
            RobotSlot::OwnA => (Vector2::new(x, self.height * 17.0 / 40.0), 0.0),
            RobotSlot::OwnB => (Vector2::new(x, self.height / 6.0), 0.0),
            RobotSlot::OppAttacker => (
                Vector2::new(x, self.height * 7.0 / 10.0),
                std::f64::consts::PI,
            ),
            RobotSlot::OppDefender => (
                Vector2::new(x, self.height * 5.0 / 6.0),
                std::f64::consts::PI,
            ),
        }
    }

    /// Pose a robot is put back to when taken off the field, behind its own
    /// end line.
    pub fn reset_pose(&self, slot: RobotSlot) -> (Vector2, f64) {
        let y = match slot.side() {
            crate::Side::Own => 30.0,
            crate::Side::Opponent => self.height - 30.0,
        };
        (
            Vector2::new(self.width / 2.0, y),
            std::f64::consts::FRAC_PI_2,
        )
    }
}
