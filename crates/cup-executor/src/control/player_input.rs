use cup_core::ChaseState;

/// Which way the robot spins when flicking the ball off its back dribbler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlickDirection {
    /// Spin counter-clockwise, flicking the ball to the right
    CounterClockwise,
    /// Spin clockwise, flicking the ball to the left
    Clockwise,
}

/// Actuator use in the current update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActuatorInput {
    #[default]
    Idle,
    /// Kick the ball held by the front dribbler
    Kick,
    /// Flick the ball held by the back dribbler
    Flick(FlickDirection),
}

/// Output of a role program for one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerControlInput {
    /// Commanded speed, never negative
    pub speed: f64,
    /// Travel bearing in world axes, in radians. May be unwrapped.
    pub bearing: f64,
    /// Target raw angle for the heading servo. If `None` the previous target
    /// is kept.
    pub heading: Option<f64>,
    /// Steering mode used to compose `bearing`
    pub chase_state: Option<ChaseState>,
    pub actuator: ActuatorInput,
    /// Run the dribble resolver for this robot even if automatic dribbling
    /// is off for its role
    pub dribble: bool,
}

impl PlayerControlInput {
    /// Create a new instance of `PlayerControlInput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the commanded speed and travel bearing.
    pub fn with_velocity(&mut self, speed: f64, bearing: f64) -> &mut Self {
        self.speed = speed.max(0.0);
        self.bearing = bearing;
        self
    }

    /// Set the target raw heading.
    pub fn with_heading(&mut self, heading: f64) -> &mut Self {
        self.heading = Some(heading);
        self
    }

    pub fn with_chase_state(&mut self, chase_state: ChaseState) -> &mut Self {
        self.chase_state = Some(chase_state);
        self
    }

    pub fn with_actuator(&mut self, actuator: ActuatorInput) -> &mut Self {
        self.actuator = actuator;
        self
    }

    /// Request the dribbler this tick.
    pub fn with_dribbling(&mut self) -> &mut Self {
        self.dribble = true;
        self
    }
}
