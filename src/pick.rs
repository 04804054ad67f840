use crate::{
	helper::is_pick_filtered,
	types::{Ray, Vector3, Vector4},
	GeometryError,
};

/// Finds the particle closest to the ray origin, measured along the ray, out of
/// those lying within `radius` of the ray and in front of its origin.
///
/// Particles whose phase carries [crate::config::PICK_FILTER_BIT] are skipped.
/// Ties keep the lowest index.
pub fn pick_particle(
	ray: &Ray,
	particles: &[Vector4],
	phases: Option<&[i32]>,
	radius: f32,
) -> Result<Option<usize>, GeometryError> {
	if let Some(phases) = phases {
		if phases.len() < particles.len() {
			return Err(GeometryError::LengthMismatch {
				what: "phases",
				expected: particles.len(),
				got: phases.len(),
			});
		}
	}

	let max_dist_sq = radius * radius;
	let mut min_t = f32::MAX;
	let mut min_index = None;

	for (i, particle) in particles.iter().enumerate() {
		if phases.map_or(false, |phases| is_pick_filtered(phases[i])) {
			continue;
		}

		let delta = Vector3::from(*particle) - ray.origin;
		let t = delta.dot(ray.dir);

		if t > 0.0 {
			let perp = delta - ray.dir * t;

			if perp.length2() < max_dist_sq && t < min_t {
				min_t = t;
				min_index = Some(i);
			}
		}
	}

	log::trace!("picked {:?} out of {} particles", min_index, particles.len());

	Ok(min_index)
}
