//! Geometry helpers for FleX hosts: particle picking, convex plane extraction,
//! cloth reference points and bounds.
//!
//! Every operation has a safe slice based version in its own module. The
//! `flexUtils*` symbols below expose them over the C ABI for hosts that load
//! this library dynamically.

use std::ffi::c_void;

pub mod bounds;
pub mod cloth;
pub mod config;
pub mod convex;
pub mod copy;
pub mod helper;
pub mod observe;
pub mod pick;
pub mod types;

#[cfg(feature = "gmod")]
mod gmod;

pub use bounds::compute_bounds;
pub use cloth::cloth_ref_points;
pub use convex::{convex_planes, ConvexPlanes};
pub use copy::copy_bytes;
pub use pick::pick_particle;
pub use types::{Bounds, Plane, Ray, Vector3, Vector4};

#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
	#[error("Index {index} out of range for {len} elements")]
	IndexOutOfRange { index: i64, len: usize },

	#[error("Triangle list of length {0} is not a multiple of 3")]
	PartialTriangle(usize),

	#[error("Expected {expected} {what}, got {got}")]
	LengthMismatch {
		what: &'static str,
		expected: usize,
		got: usize,
	},

	#[error("Copy of {size} bytes from {src_offset}/{src_len} to {dst_offset}/{dst_len} is out of range")]
	CopyOutOfRange {
		src_len: usize,
		dst_len: usize,
		src_offset: usize,
		dst_offset: usize,
		size: usize,
	},
}

/// Views a host array. Null or non-positive lengths give an empty slice.
unsafe fn host_slice<'a, T>(ptr: *const T, len: i32) -> &'a [T] {
	if ptr.is_null() || len <= 0 {
		&[]
	} else {
		std::slice::from_raw_parts(ptr, len as usize)
	}
}

/// Number of elements an index list refers into, for host arrays passed without a length.
fn indexed_len(indices: &[i32]) -> Result<usize, GeometryError> {
	match indices.iter().copied().min() {
		Some(min) if min < 0 => Err(GeometryError::IndexOutOfRange {
			index: min as i64,
			len: 0,
		}),
		_ => Ok(indices.iter().map(|&i| i as usize + 1).max().unwrap_or(0)),
	}
}

// Not used
#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn flexUtilsDeviceFromResource(_resource: *mut c_void) -> *mut c_void {
	std::ptr::null_mut()
}

/// Fast copy from/to managed memory.
///
/// # Safety
/// `src + src_ofs` and `dst + dst_ofs` must be valid for `size` bytes and must not overlap.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn flexUtilsFastCopy(
	src: *const u8,
	src_ofs: i32,
	dst: *mut u8,
	dst_ofs: i32,
	size: i32,
) {
	if size <= 0 {
		return;
	}

	if src_ofs < 0 || dst_ofs < 0 || src.is_null() || dst.is_null() {
		log::warn!(
			"flexUtilsFastCopy: rejected copy of {} bytes ({:p}+{} -> {:p}+{})",
			size,
			src,
			src_ofs,
			dst,
			dst_ofs
		);
		return;
	}

	std::ptr::copy_nonoverlapping(
		src.add(src_ofs as usize),
		dst.add(dst_ofs as usize),
		size as usize,
	);
}

/// Returns the index of the picked particle, or -1.
///
/// # Safety
/// `origin` and `dir` must be valid, `particles` (and `phases` unless null) must hold `n` elements.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn flexUtilsPickParticle(
	origin: *const Vector3,
	dir: *const Vector3,
	particles: *const Vector4,
	phases: *const i32,
	n: i32,
	radius: f32,
) -> i32 {
	let ray = Ray::new(*origin, *dir);
	let particles = host_slice(particles, n);
	let phases = if phases.is_null() {
		None
	} else {
		Some(host_slice(phases, n))
	};

	match pick_particle(&ray, particles, phases, radius) {
		Ok(Some(index)) => index as i32,
		Ok(None) => -1,
		Err(why) => {
			log::warn!("flexUtilsPickParticle: {}", why);
			-1
		}
	}
}

/// Writes up to `triangle_count` planes and returns how many were written.
/// `bounds` receives min then max.
///
/// # Safety
/// `mesh_triangles` must hold `triangle_count * 3` valid indices into `mesh_vertices`,
/// `planes` must have room for `triangle_count` planes and `bounds` for two vectors.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn flexUtilsConvexPlanes(
	mesh_vertices: *const Vector3,
	local_scale: *const Vector3,
	mesh_triangles: *const i32,
	triangle_count: i32,
	planes: *mut Vector4,
	bounds: *mut Vector3,
) -> i32 {
	let triangles = host_slice(mesh_triangles, triangle_count.max(0).saturating_mul(3));

	let result = indexed_len(triangles).and_then(|vertex_count| {
		let vertices = host_slice(mesh_vertices, vertex_count as i32);
		convex_planes(vertices, *local_scale, triangles)
	});

	let hull = match result {
		Ok(hull) => hull,
		Err(why) => {
			log::warn!("flexUtilsConvexPlanes: {}", why);
			return 0;
		}
	};

	if !planes.is_null() {
		std::ptr::copy_nonoverlapping(hull.planes.as_ptr(), planes, hull.planes.len());
	}

	if !bounds.is_null() {
		bounds.write(hull.bounds.min);
		bounds.add(1).write(hull.bounds.max);
	}

	hull.planes.len() as i32
}

/// # Safety
/// `particles` must hold `count` elements and `ref_points` must have room for three.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn flexUtilsClothRefPoints(
	particles: *const Vector4,
	count: i32,
	ref_points: *mut i32,
) {
	let points = cloth_ref_points(host_slice(particles, count));

	if ref_points.is_null() {
		return;
	}

	for (slot, index) in points.into_iter().enumerate() {
		ref_points.add(slot).write(index as i32);
	}
}

/// # Safety
/// `indices` must hold `count` valid indices into `particles`.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn flexUtilsComputeBounds(
	particles: *const Vector4,
	indices: *const i32,
	count: i32,
	bounds_min: *mut Vector3,
	bounds_max: *mut Vector3,
) {
	let indices = host_slice(indices, count);

	let result = indexed_len(indices).and_then(|particle_count| {
		compute_bounds(host_slice(particles, particle_count as i32), indices)
	});

	match result {
		Ok(aabb) => {
			if !bounds_min.is_null() {
				bounds_min.write(aabb.min);
			}
			if !bounds_max.is_null() {
				bounds_max.write(aabb.max);
			}
		}
		Err(why) => log::warn!("flexUtilsComputeBounds: {}", why),
	}
}

/// # Safety
/// `velocities` must hold `n` elements.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn flexUtilsAverageVelocityMagnitude(velocities: *const Vector3, n: i32) -> f32 {
	observe::average_velocity_magnitude(host_slice(velocities, n))
}

/// Fills `out` with `max_particles * 8` observation floats for one actor, padding
/// unused slots with `fill`. Returns the number of particles written, or -1 when
/// they don't fit, in which case `out` is left untouched.
///
/// # Safety
/// `particles` and `velocities` must hold `count` elements and `out` must have room
/// for `max_particles * 8` floats.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn flexUtilsCollectObservations(
	particles: *const Vector4,
	velocities: *const Vector3,
	count: i32,
	id: i32,
	max_particles: i32,
	fill: f32,
	out: *mut f32,
) -> i32 {
	let mut obs = observe::ObservationBuffer::new(max_particles.max(0) as usize);

	if let Err(why) = obs.push_actor(host_slice(particles, count), host_slice(velocities, count), id) {
		log::warn!("flexUtilsCollectObservations: {}", why);
		return -1;
	}

	let written = obs.particle_count() as i32;
	let data = obs.finish(fill);
	if !out.is_null() {
		std::ptr::copy_nonoverlapping(data.as_ptr(), out, data.len());
	}

	written
}
