use bitflags::bitflags;

use crate::config;

pub const PHASE_GROUP_MASK: i32 = 0x000f_ffff;
pub const PHASE_FLAGS_MASK: i32 = 0x00f0_0000;
pub const PHASE_SHAPE_CHANNEL_MASK: i32 = 0xff00_0000_u32 as i32;

bitflags! {
	/// Behaviour flags stored in bits 20..24 of a phase word.
	#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
	pub struct PhaseFlags: i32 {
		const SELF_COLLIDE = 1 << 20;
		const SELF_COLLIDE_FILTER = 1 << 21;
		const FLUID = 1 << 22;
	}
}

/// Builds a phase word, colliding with every shape channel.
#[inline(always)]
pub fn make_phase(group: i32, flags: PhaseFlags) -> i32 {
	make_phase_with_channels(group, flags, PHASE_SHAPE_CHANNEL_MASK)
}

#[inline(always)]
pub fn make_phase_with_channels(group: i32, flags: PhaseFlags, channels: i32) -> i32 {
	(group & PHASE_GROUP_MASK)
		| (flags.bits() & PHASE_FLAGS_MASK)
		| (channels & PHASE_SHAPE_CHANNEL_MASK)
}

#[inline(always)]
pub fn phase_group(phase: i32) -> i32 {
	phase & PHASE_GROUP_MASK
}

#[inline(always)]
pub fn phase_flags(phase: i32) -> PhaseFlags {
	PhaseFlags::from_bits_truncate(phase & PHASE_FLAGS_MASK)
}

/// Whether picking should skip a particle with this phase.
#[inline(always)]
pub fn is_pick_filtered(phase: i32) -> bool {
	phase & config::PICK_FILTER_BIT != 0
}

/// Returns `phase` with the pick filter bit set or cleared.
#[inline(always)]
pub fn with_pick_filter(phase: i32, filtered: bool) -> i32 {
	if filtered {
		phase | config::PICK_FILTER_BIT
	} else {
		phase & !config::PICK_FILTER_BIT
	}
}
