//! Growable typed GPU buffers.
//!
//! A GPU buffer cannot be resized in place, so writes that exceed the
//! current capacity allocate a replacement at twice the required size.

use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// A GPU buffer holding a slice of `T` that grows on demand.
///
/// Never shrinks. The item count tracks the most recent write.
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    /// Capacity in items.
    capacity: usize,
    count: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Buffer initialized from existing data. An empty slice still
    /// allocates room for one item so the buffer is always bindable.
    #[must_use]
    pub fn new_with_data(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        let zeroed = [T::zeroed()];
        let contents: &[T] = if data.is_empty() { &zeroed } else { data };
        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(contents),
                usage: usage | wgpu::BufferUsages::COPY_DST,
            });

        Self {
            buffer,
            capacity: contents.len(),
            count: data.len(),
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    /// Write data to the buffer, growing if necessary.
    ///
    /// Growth replaces the underlying `wgpu::Buffer`, so only vertex and
    /// index buffers, which are bound per draw, may use this type.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) {
        if let Some(new_capacity) = required_capacity(self.capacity, data.len())
        {
            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: (new_capacity * size_of::<T>()) as u64,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            log::debug!(
                "{}: grew from {} to {new_capacity} items",
                self.label,
                self.capacity
            );
            self.capacity = new_capacity;
        }

        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        self.count = data.len();
    }

    /// Slice covering the items of the last write.
    #[must_use]
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..(self.count * size_of::<T>()) as u64)
    }

    /// Items written by the last write.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// New capacity when `needed` items do not fit in `current`.
fn required_capacity(current: usize, needed: usize) -> Option<usize> {
    (needed > current).then(|| grown_capacity(current, needed))
}

/// 2x growth over what is needed, and never less than 64 items more than
/// the old capacity.
fn grown_capacity(current: usize, needed: usize) -> usize {
    (needed * 2).max(current + 64)
}

#[cfg(test)]
mod tests {
    use super::{grown_capacity, required_capacity};

    #[test]
    fn writes_within_capacity_keep_the_buffer() {
        assert_eq!(required_capacity(64, 0), None);
        assert_eq!(required_capacity(64, 64), None);
        assert_eq!(required_capacity(64, 65), Some(130));
    }

    #[test]
    fn growth_doubles_the_request() {
        assert_eq!(grown_capacity(1, 5000), 10_000);
    }

    #[test]
    fn growth_has_a_floor() {
        assert_eq!(grown_capacity(100, 101), 202);
        assert_eq!(grown_capacity(1000, 1001), 2002);
        assert_eq!(grown_capacity(10, 11), 74);
    }
}
