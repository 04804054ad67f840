//! Garry's Mod binary module. Registers the `flexutils` library:
//!
//! ```lua
//! local i = flexutils.PickParticle(origin, dir, particles, radius, phases)
//! local planes, mins, maxs = flexutils.ConvexPlanes(vertices, scale, triangles)
//! local a, b, c = flexutils.ClothRefPoints(particles)
//! local mins, maxs = flexutils.ComputeBounds(particles, indices)
//! local speed = flexutils.AverageVelocity(velocities)
//! ```
//!
//! Vectors are array tables (`{x, y, z}`, particles `{x, y, z, imass}`) and all
//! indices are 1-based. Failures return `nil, message`.

use std::ffi::CString;
use std::fmt::Display;

use rglua::prelude::*;

use crate::{
	cloth_ref_points, compute_bounds, convex_planes,
	observe::average_velocity_magnitude,
	pick_particle,
	types::{Ray, Vector3, Vector4},
};

fn push_error(l: LuaState, why: impl Display) -> i32 {
	let msg = CString::new(why.to_string()).unwrap_or_default();
	lua_pushnil(l);
	lua_pushstring(l, msg.as_ptr());
	2
}

fn is_table(l: LuaState, idx: i32) -> bool {
	lua_istable(l, idx)
}

fn is_number(l: LuaState, idx: i32) -> bool {
	lua_isnumber(l, idx) != 0
}

/// Reads up to four numeric components of the table at absolute index `idx`.
fn read_components(l: LuaState, idx: i32) -> [f32; 4] {
	let mut out = [0.0; 4];
	for (c, slot) in out.iter_mut().enumerate() {
		lua_rawgeti(l, idx, c as i32 + 1);
		*slot = lua_tonumber(l, -1) as f32;
		lua_settop(l, -2);
	}
	out
}

fn read_vector3(l: LuaState, idx: i32) -> Vector3 {
	let [x, y, z, _] = read_components(l, idx);
	Vector3(x, y, z)
}

fn read_vector4(l: LuaState, idx: i32) -> Vector4 {
	let [x, y, z, w] = read_components(l, idx);
	Vector4(x, y, z, w)
}

/// Reads every element of the array table at `idx` with `read`.
fn read_array<T>(l: LuaState, idx: i32, read: impl Fn(LuaState, i32) -> T) -> Vec<T> {
	let len = lua_objlen(l, idx) as usize;
	let mut out = Vec::with_capacity(len);
	for i in 0 .. len {
		lua_rawgeti(l, idx, i as i32 + 1);
		let top = lua_gettop(l) as i32;
		out.push(read(l, top));
		lua_settop(l, -2);
	}
	out
}

/// Lua index to a zero based one. Out of range numbers end up negative or past the end.
fn zero_based(n: f64) -> i32 {
	(n as i32).saturating_sub(1)
}

fn read_indices(l: LuaState, idx: i32) -> Vec<i32> {
	read_array(l, idx, |l, top| zero_based(lua_tonumber(l, top)))
}

fn push_vector3(l: LuaState, v: Vector3) {
	lua_createtable(l, 3, 0);
	for (c, value) in [v.0, v.1, v.2].into_iter().enumerate() {
		lua_pushnumber(l, value as f64);
		lua_rawseti(l, -2, c as i32 + 1);
	}
}

fn push_vector4(l: LuaState, v: Vector4) {
	lua_createtable(l, 4, 0);
	for (c, value) in [v.0, v.1, v.2, v.3].into_iter().enumerate() {
		lua_pushnumber(l, value as f64);
		lua_rawseti(l, -2, c as i32 + 1);
	}
}

#[lua_function]
fn pick(l: LuaState) -> i32 {
	for arg in 1 ..= 3 {
		if !is_table(l, arg) {
			return push_error(l, format!("bad argument #{} (table expected)", arg));
		}
	}

	// No raising Lua errors once Rust values are live.
	if !is_number(l, 4) {
		return push_error(l, "bad argument #4 (number expected)");
	}

	let radius = lua_tonumber(l, 4) as f32;
	let ray = Ray::new(read_vector3(l, 1), read_vector3(l, 2));
	let particles = read_array(l, 3, read_vector4);
	let phases = if is_table(l, 5) {
		Some(read_array(l, 5, |l, top| lua_tonumber(l, top) as i32))
	} else {
		None
	};

	match pick_particle(&ray, &particles, phases.as_deref(), radius) {
		Ok(Some(index)) => lua_pushinteger(l, (index + 1) as _),
		Ok(None) => lua_pushnil(l),
		Err(why) => return push_error(l, why),
	}

	1
}

#[lua_function]
fn planes(l: LuaState) -> i32 {
	if !is_table(l, 1) || !is_table(l, 2) || !is_table(l, 3) {
		return push_error(l, "expected (vertices, scale, triangles) tables");
	}

	let vertices = read_array(l, 1, read_vector3);
	let scale = read_vector3(l, 2);
	let triangles = read_indices(l, 3);

	let hull = match convex_planes(&vertices, scale, &triangles) {
		Ok(hull) => hull,
		Err(why) => return push_error(l, why),
	};

	lua_createtable(l, hull.planes.len() as i32, 0);
	for (i, plane) in hull.planes.iter().enumerate() {
		push_vector4(l, *plane);
		lua_rawseti(l, -2, i as i32 + 1);
	}

	push_vector3(l, hull.bounds.min);
	push_vector3(l, hull.bounds.max);

	3
}

#[lua_function]
fn ref_points(l: LuaState) -> i32 {
	if !is_table(l, 1) {
		return push_error(l, "bad argument #1 (table expected)");
	}

	let particles = read_array(l, 1, read_vector4);
	for index in cloth_ref_points(&particles) {
		lua_pushinteger(l, (index + 1) as _);
	}

	3
}

#[lua_function]
fn bounds(l: LuaState) -> i32 {
	if !is_table(l, 1) || !is_table(l, 2) {
		return push_error(l, "expected (particles, indices) tables");
	}

	let particles = read_array(l, 1, read_vector4);
	let indices = read_indices(l, 2);

	match compute_bounds(&particles, &indices) {
		Ok(aabb) => {
			push_vector3(l, aabb.min);
			push_vector3(l, aabb.max);
			2
		}
		Err(why) => push_error(l, why),
	}
}

#[lua_function]
fn average_velocity(l: LuaState) -> i32 {
	if !is_table(l, 1) {
		return push_error(l, "bad argument #1 (table expected)");
	}

	let velocities = read_array(l, 1, read_vector3);
	lua_pushnumber(l, average_velocity_magnitude(&velocities) as f64);

	1
}

#[gmod_open]
fn open(l: LuaState) -> i32 {
	let r = reg! [
		"PickParticle" => pick,
		"ConvexPlanes" => planes,
		"ClothRefPoints" => ref_points,
		"ComputeBounds" => bounds,
		"AverageVelocity" => average_velocity
	];

	luaL_register(l, cstr!("flexutils"), r.as_ptr());
	printgm!(l, "Loaded flexutils {}", env!("CARGO_PKG_VERSION"));

	0
}

#[gmod_close]
fn close(_l: LuaState) -> i32 {
	0
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lua_indices_become_zero_based() {
		assert_eq!(zero_based(1.0), 0);
		assert_eq!(zero_based(3.0), 2);
		assert_eq!(zero_based(0.0), -1);
	}

	#[test]
	fn huge_negative_indices_saturate() {
		assert_eq!(zero_based(-1e12), i32::MIN);
		assert_eq!(zero_based(f64::NEG_INFINITY), i32::MIN);
		assert_eq!(zero_based(f64::NAN), -1);
	}
}
