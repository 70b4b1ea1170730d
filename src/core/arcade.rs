//! Minimal arcade physics: AABB bodies under gravity, immovable platforms,
//! bounce-and-rest collision resolution, and overlap tests.
//!
//! No rotation, no complex shapes. Penetration each tick is a fraction of a
//! platform's thickness at these speeds, so separation along the axis of
//! least penetration is sufficient.

/// Rebound speeds below this come to rest instead of bouncing forever.
pub const REST_SPEED: f64 = 10.0;

/// A dynamic rectangle with velocity and a vertical bounce coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub vx: f64,
    pub vy: f64,
    pub bounce_y: f64,
    /// True while the body had a resolved downward contact this tick.
    pub on_floor: bool,
}

impl Body {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            vx: 0.0,
            vy: 0.0,
            bounce_y: 0.0,
            on_floor: false,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

/// An immovable rectangle. It may still carry a vertical velocity of its
/// own (the oscillating ledges) but never reacts to collisions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub vy: f64,
}

impl Platform {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            vy: 0.0,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

/// Advance a body by one step: apply gravity, then move. Clears the
/// touching-down flag; collision resolution re-establishes it.
pub fn integrate(body: &mut Body, gravity: f64, dt: f64) {
    body.on_floor = false;
    body.vy += gravity * dt;
    body.x += body.vx * dt;
    body.y += body.vy * dt;
}

/// Move a platform by its own velocity.
pub fn move_platform(platform: &mut Platform, dt: f64) {
    platform.y += platform.vy * dt;
}

/// Separate a body from a platform it penetrates, along the axis of least
/// penetration. Landing on top rebounds with the body's bounce coefficient
/// and comes to rest once the rebound drops under [`REST_SPEED`].
pub fn collide_platform(body: &mut Body, platform: &Platform) {
    let overlap_x = body.right().min(platform.right()) - body.left().max(platform.left());
    let overlap_y = body.bottom().min(platform.bottom()) - body.top().max(platform.top());
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return;
    }

    if overlap_y <= overlap_x {
        let body_center = body.y + body.h / 2.0;
        let platform_center = platform.y + platform.h / 2.0;
        if body_center < platform_center {
            // Landing on top, or being carried by a rising ledge.
            body.y = platform.top() - body.h;
            if body.vy > 0.0 {
                let rebound = -body.vy * body.bounce_y;
                body.vy = if rebound.abs() < REST_SPEED { 0.0 } else { rebound };
            }
            body.on_floor = true;
        } else {
            // Head bump from below.
            body.y = platform.bottom();
            if body.vy < 0.0 {
                body.vy = -body.vy * body.bounce_y;
            }
        }
    } else {
        let body_center = body.x + body.w / 2.0;
        let platform_center = platform.x + platform.w / 2.0;
        if body_center < platform_center {
            body.x = platform.left() - body.w;
        } else {
            body.x = platform.right();
        }
        body.vx = 0.0;
    }
}

/// Keep a body inside the world rectangle, killing velocity into the wall.
pub fn clamp_to_world(body: &mut Body, width: f64, height: f64) {
    if body.x < 0.0 {
        body.x = 0.0;
        body.vx = 0.0;
    } else if body.right() > width {
        body.x = width - body.w;
        body.vx = 0.0;
    }

    if body.y < 0.0 {
        body.y = 0.0;
        if body.vy < 0.0 {
            body.vy = 0.0;
        }
    } else if body.bottom() > height {
        body.y = height - body.h;
        if body.vy > 0.0 {
            let rebound = -body.vy * body.bounce_y;
            body.vy = if rebound.abs() < REST_SPEED { 0.0 } else { rebound };
        }
        body.on_floor = true;
    }
}

/// Axis-aligned overlap test between two bodies.
pub fn overlaps(a: &Body, b: &Body) -> bool {
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}
