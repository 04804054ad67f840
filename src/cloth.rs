use crate::types::{Vector3, Vector4};

/// Picks the three particles spanning the largest triangle, used by the host as a
/// stable local frame for a cloth.
///
/// Searches every triple, so this is cubic in the particle count. Returns
/// `[0, 1, 2]` when there are fewer than three particles or every triple is degenerate.
pub fn cloth_ref_points(particles: &[Vector4]) -> [usize; 3] {
	let mut ref_points = [0, 1, 2];
	let mut max_area2 = 0.0;

	for i in 0 .. particles.len() {
		let pi = Vector3::from(particles[i]);
		for j in i + 1 .. particles.len() {
			let pj = Vector3::from(particles[j]);
			for k in j + 1 .. particles.len() {
				let pk = Vector3::from(particles[k]);

				let area2 = (pj - pi).cross(pk - pi).length2();
				if area2 > max_area2 {
					max_area2 = area2;
					ref_points = [i, j, k];
				}
			}
		}
	}

	log::trace!("cloth reference points {:?} (area² {})", ref_points, max_area2);

	ref_points
}
