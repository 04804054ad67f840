use crate::GeometryError;

/// Copies `size` bytes from `src[src_offset..]` to `dst[dst_offset..]`.
pub fn copy_bytes(
	src: &[u8],
	src_offset: usize,
	dst: &mut [u8],
	dst_offset: usize,
	size: usize,
) -> Result<(), GeometryError> {
	let (src_len, dst_len) = (src.len(), dst.len());
	let range_err = || GeometryError::CopyOutOfRange {
		src_len,
		dst_len,
		src_offset,
		dst_offset,
		size,
	};

	let src_end = src_offset.checked_add(size).ok_or_else(range_err)?;
	let dst_end = dst_offset.checked_add(size).ok_or_else(range_err)?;
	if src_end > src_len || dst_end > dst_len {
		return Err(range_err());
	}

	dst[dst_offset .. dst_end].copy_from_slice(&src[src_offset .. src_end]);
	Ok(())
}

/// Copies a slice of plain vectors into a byte buffer, as the host does when
/// moving particles out of managed memory.
pub fn copy_pod<T: bytemuck::Pod>(
	src: &[T],
	dst: &mut [u8],
	dst_offset: usize,
) -> Result<(), GeometryError> {
	let bytes: &[u8] = bytemuck::cast_slice(src);
	copy_bytes(bytes, 0, dst, dst_offset, bytes.len())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::Vector4;

	#[test]
	fn copies_exact_window() {
		let src = [1u8, 2, 3, 4, 5];
		let mut dst = [0u8; 6];
		copy_bytes(&src, 1, &mut dst, 2, 3).unwrap();
		assert_eq!(dst, [0, 0, 2, 3, 4, 0]);
	}

	#[test]
	fn zero_size_is_noop() {
		let mut dst = [9u8; 2];
		copy_bytes(&[], 0, &mut dst, 2, 0).unwrap();
		assert_eq!(dst, [9, 9]);
	}

	#[test]
	fn rejects_overruns() {
		let mut dst = [0u8; 4];
		assert!(copy_bytes(&[0u8; 4], 2, &mut dst, 0, 3).is_err());
		assert!(copy_bytes(&[0u8; 4], 0, &mut dst, 2, 3).is_err());
		assert!(copy_bytes(&[0u8; 4], usize::MAX, &mut dst, 0, 1).is_err());
		assert_eq!(dst, [0; 4]);
	}

	#[test]
	fn pod_copy_is_bitwise() {
		let particles = [Vector4(1.0, 2.0, 3.0, 4.0)];
		let mut dst = [0u8; 20];
		copy_pod(&particles, &mut dst, 4).unwrap();

		let back: Vector4 = bytemuck::pod_read_unaligned(&dst[4 ..]);
		assert_eq!(back, particles[0]);
		assert_eq!(&dst[.. 4], &[0; 4]);
	}
}
