use crate::{
	config,
	types::{Bounds, Plane, Vector3},
	GeometryError,
};

/// Planes of a convex mesh, plus the box around every triangle vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvexPlanes {
	pub planes: Vec<Plane>,
	pub bounds: Bounds,
}

fn vertex(vertices: &[Vector3], triangles: &[i32], slot: usize) -> Result<Vector3, GeometryError> {
	let index = triangles[slot];
	usize::try_from(index)
		.ok()
		.and_then(|i| vertices.get(i))
		.copied()
		.ok_or(GeometryError::IndexOutOfRange {
			index: index as i64,
			len: vertices.len(),
		})
}

/// Builds one outward plane per non-degenerate triangle of a convex mesh.
///
/// Vertices are scaled component-wise by `scale` first. Planes closer than
/// [config::PLANE_EPSILON] (squared, over all four components) to one already
/// accepted are dropped, so the result holds at most one plane per triangle.
pub fn convex_planes(
	vertices: &[Vector3],
	scale: Vector3,
	triangles: &[i32],
) -> Result<ConvexPlanes, GeometryError> {
	if triangles.len() % 3 != 0 {
		return Err(GeometryError::PartialTriangle(triangles.len()));
	}

	let mut out = ConvexPlanes::default();

	for tri in 0 .. triangles.len() / 3 {
		let p0 = vertex(vertices, triangles, tri * 3)? * scale;
		let p1 = vertex(vertices, triangles, tri * 3 + 1)? * scale;
		let p2 = vertex(vertices, triangles, tri * 3 + 2)? * scale;

		out.bounds.grow(p0);
		out.bounds.grow(p1);
		out.bounds.grow(p2);

		let mut n = (p1 - p0).cross(p2 - p0);
		let l2 = n.length2();
		if l2 <= config::AREA_EPSILON {
			continue;
		}

		n /= l2.sqrt();
		let plane = n.extend(-n.dot(p0));

		let unique = out
			.planes
			.iter()
			.all(|&existing| (plane - existing).length2() >= config::PLANE_EPSILON);

		if unique {
			out.planes.push(plane);
		}
	}

	log::debug!(
		"{} planes from {} triangles",
		out.planes.len(),
		triangles.len() / 3
	);

	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::Vector4;
	use approx::assert_relative_eq;

	/// Unit cube centered on the origin, wound counter-clockwise seen from outside.
	fn cube() -> (Vec<Vector3>, Vec<i32>) {
		let v = vec![
			Vector3(-0.5, -0.5, -0.5),
			Vector3(0.5, -0.5, -0.5),
			Vector3(0.5, 0.5, -0.5),
			Vector3(-0.5, 0.5, -0.5),
			Vector3(-0.5, -0.5, 0.5),
			Vector3(0.5, -0.5, 0.5),
			Vector3(0.5, 0.5, 0.5),
			Vector3(-0.5, 0.5, 0.5),
		];
		#[rustfmt::skip]
		let t = vec![
			0, 2, 1,  0, 3, 2, // -z
			4, 5, 6,  4, 6, 7, // +z
			0, 1, 5,  0, 5, 4, // -y
			3, 7, 6,  3, 6, 2, // +y
			0, 4, 7,  0, 7, 3, // -x
			1, 2, 6,  1, 6, 5, // +x
		];
		(v, t)
	}

	#[test]
	fn cube_has_six_outward_planes() {
		let (v, t) = cube();
		let hull = convex_planes(&v, Vector3(1.0, 1.0, 1.0), &t).unwrap();

		assert_eq!(hull.planes.len(), 6);
		for plane in &hull.planes {
			assert_relative_eq!(plane.xyz().length(), 1.0, epsilon = 1e-6);
			assert_relative_eq!(plane.3, -0.5, epsilon = 1e-6);
			// Origin is inside every plane.
			assert!(plane.3 < 0.0);
		}

		assert_eq!(hull.bounds.min, Vector3(-0.5, -0.5, -0.5));
		assert_eq!(hull.bounds.max, Vector3(0.5, 0.5, 0.5));
	}

	#[test]
	fn scale_applies_to_planes_and_bounds() {
		let (v, t) = cube();
		let hull = convex_planes(&v, Vector3(2.0, 4.0, 6.0), &t).unwrap();

		assert_eq!(hull.planes.len(), 6);
		assert_eq!(hull.bounds.min, Vector3(-1.0, -2.0, -3.0));
		assert_eq!(hull.bounds.max, Vector3(1.0, 2.0, 3.0));

		let top = hull
			.planes
			.iter()
			.find(|p| p.2 > 0.5)
			.expect("a +z plane");
		assert_relative_eq!(top.3, -3.0, epsilon = 1e-6);
	}

	#[test]
	fn planes_are_pairwise_distinct_and_bounded_by_triangle_count() {
		let (v, t) = cube();
		let hull = convex_planes(&v, Vector3(1.0, 1.0, 1.0), &t).unwrap();

		assert!(hull.planes.len() <= t.len() / 3);
		for (i, a) in hull.planes.iter().enumerate() {
			for b in &hull.planes[i + 1 ..] {
				assert!((*a - *b).length2() >= config::PLANE_EPSILON);
			}
		}
	}

	#[test]
	fn nearly_identical_planes_merge() {
		let unit = Vector3(1.0, 1.0, 1.0);
		let mut v = vec![
			Vector3(0.0, 0.0, 0.0),
			Vector3(1.0, 0.0, 0.0),
			Vector3(0.0, 1.0, 0.0),
			Vector3(0.0, 0.0, 1e-5),
		];

		let hull = convex_planes(&v, unit, &[0, 1, 2, 3, 1, 2]).unwrap();
		assert_eq!(hull.planes.len(), 1);
		assert_eq!(hull.planes[0], Vector4(0.0, 0.0, 1.0, 0.0));

		// Tilted enough to clear the epsilon.
		v[3] = Vector3(0.0, 0.0, 1e-3);
		let hull = convex_planes(&v, unit, &[0, 1, 2, 3, 1, 2]).unwrap();
		assert_eq!(hull.planes.len(), 2);
		assert!((hull.planes[0] - hull.planes[1]).length2() >= config::PLANE_EPSILON);
	}

	#[test]
	fn degenerate_triangles_only_grow_bounds() {
		let v = [Vector3(0.0, 0.0, 0.0), Vector3(1.0, 1.0, 1.0), Vector3(2.0, 2.0, 2.0)];
		let hull = convex_planes(&v, Vector3(1.0, 1.0, 1.0), &[0, 1, 2, 0, 0, 0]).unwrap();

		assert!(hull.planes.is_empty());
		assert_eq!(hull.bounds.min, Vector3(0.0, 0.0, 0.0));
		assert_eq!(hull.bounds.max, Vector3(2.0, 2.0, 2.0));
	}

	#[test]
	fn no_triangles_gives_empty_bounds() {
		let hull = convex_planes(&[], Vector3(1.0, 1.0, 1.0), &[]).unwrap();
		assert!(hull.planes.is_empty());
		assert!(hull.bounds.is_empty());
	}

	#[test]
	fn bad_indices_are_errors() {
		let v = [Vector3(0.0, 0.0, 0.0), Vector3(1.0, 0.0, 0.0), Vector3(0.0, 1.0, 0.0)];
		let unit = Vector3(1.0, 1.0, 1.0);

		assert!(matches!(
			convex_planes(&v, unit, &[0, 1, 3]),
			Err(GeometryError::IndexOutOfRange { index: 3, len: 3 })
		));
		assert!(matches!(
			convex_planes(&v, unit, &[0, -1, 2]),
			Err(GeometryError::IndexOutOfRange { index: -1, .. })
		));
		assert!(matches!(
			convex_planes(&v, unit, &[0, 1]),
			Err(GeometryError::PartialTriangle(2))
		));
	}
}
