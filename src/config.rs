/// Phase bit marking a particle as invisible to [crate::pick::pick_particle].
/// Lives in the shape channel range, channel 2.
pub const PICK_FILTER_BIT: i32 = 1 << 26;

pub const PLANE_EPSILON: f32 = f32::EPSILON;
pub const AREA_EPSILON: f32 = f32::EPSILON;

/// pos_x, pos_y, pos_z, imass, vel_x, vel_y, vel_z, id
pub const PARTICLE_DIMENSION: usize = 8;

pub const OBSERVATION_FILL: f32 = -1.0;
