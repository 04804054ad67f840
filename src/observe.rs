//! Flattens particle state into the fixed-size observation vectors consumed by
//! learning agents, and a couple of reductions agents reward on.

use crate::{
	config::{OBSERVATION_FILL, PARTICLE_DIMENSION},
	types::{Vector3, Vector4},
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ObservationError {
	#[error("Observation buffer is full ({0} particles)")]
	Full(usize),

	#[error("Got {particles} particles but {velocities} velocities")]
	LengthMismatch { particles: usize, velocities: usize },
}

/// Length of the mean velocity. Zero when there are no velocities.
pub fn average_velocity_magnitude(velocities: &[Vector3]) -> f32 {
	if velocities.is_empty() {
		return 0.0;
	}

	let sum = velocities
		.iter()
		.fold(Vector3::default(), |acc, &v| acc + v);

	(sum / velocities.len() as f32).length()
}

#[derive(derivative::Derivative)]
#[derivative(Debug)]
pub struct ObservationBuffer {
	max_particles: usize,
	count: usize,

	#[derivative(Debug = "ignore")]
	data: Vec<f32>,
}

impl ObservationBuffer {
	pub fn new(max_particles: usize) -> Self {
		Self {
			max_particles,
			count: 0,
			data: Vec::with_capacity(max_particles * PARTICLE_DIMENSION),
		}
	}

	/// Size of the vector returned by [Self::finish].
	pub fn observation_len(&self) -> usize {
		self.max_particles * PARTICLE_DIMENSION
	}

	pub fn is_empty(&self) -> bool {
		self.count == 0
	}

	pub fn particle_count(&self) -> usize {
		self.count
	}

	/// Appends `x, y, z, imass, vx, vy, vz, id`.
	pub fn push_particle(
		&mut self,
		particle: Vector4,
		velocity: Vector3,
		id: i32,
	) -> Result<(), ObservationError> {
		if self.count == self.max_particles {
			return Err(ObservationError::Full(self.max_particles));
		}

		self.data.extend_from_slice(&[
			particle.0,
			particle.1,
			particle.2,
			particle.3,
			velocity.0,
			velocity.1,
			velocity.2,
			id as f32,
		]);
		self.count += 1;

		Ok(())
	}

	/// Pushes every particle of one actor, stopping at the first overflow.
	pub fn push_actor(
		&mut self,
		particles: &[Vector4],
		velocities: &[Vector3],
		id: i32,
	) -> Result<(), ObservationError> {
		if particles.len() != velocities.len() {
			return Err(ObservationError::LengthMismatch {
				particles: particles.len(),
				velocities: velocities.len(),
			});
		}

		for (&p, &v) in particles.iter().zip(velocities) {
			self.push_particle(p, v, id)?;
		}
		Ok(())
	}

	/// Pads unused slots with `fill` and hands out the observation vector.
	pub fn finish(mut self, fill: f32) -> Vec<f32> {
		let len = self.observation_len();
		self.data.resize(len, fill);
		self.data
	}

	/// [Self::finish] with the default padding value.
	pub fn finish_default(self) -> Vec<f32> {
		self.finish(OBSERVATION_FILL)
	}
}
