use cup_core::{FieldGeometry, Vector2};

/// Which of the two openings beside the goalkeeper to aim for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapChoice {
    Wider,
    Narrower,
}

/// The two openings between the goalkeeper and the posts of the far goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalGaps {
    pub left_width: f64,
    pub right_width: f64,
    /// Middle of the left opening, on the goal line
    pub left_target: Vector2,
    /// Middle of the right opening, on the goal line
    pub right_target: Vector2,
}

impl GoalGaps {
    /// Measure the openings left by a goalkeeper standing at `keeper_x`. The
    /// keeper is padded by the post offset on both sides.
    pub fn new(field: &FieldGeometry, keeper_x: f64) -> Self {
        let keeper_left = keeper_x - field.goal_gap_post_offset;
        let keeper_right = keeper_x + field.goal_gap_post_offset;
        let y = field.far_goal_y();
        Self {
            left_width: keeper_left - field.goal_post_x,
            right_width: field.right_post_x() - keeper_right,
            left_target: Vector2::new((keeper_left + field.goal_post_x) / 2.0, y),
            right_target: Vector2::new((field.right_post_x() + keeper_right) / 2.0, y),
        }
    }

    /// Aim point for the given choice. The left opening is only chosen when it
    /// is strictly wider (or strictly narrower); ties go right.
    pub fn target(&self, choice: GapChoice) -> Vector2 {
        let left = match choice {
            GapChoice::Wider => self.left_width > self.right_width,
            GapChoice::Narrower => self.left_width < self.right_width,
        };
        if left {
            self.left_target
        } else {
            self.right_target
        }
    }
}
