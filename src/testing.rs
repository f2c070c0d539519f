//! Test sources: scripted draws and draw counting

use rand::RngCore;

/// Source that replays a fixed list of 31-bit values
///
/// `next_u31` on the blanket `UniformSource` impl takes the high 31 bits of
/// `next_u32`, so each scripted value is shifted left by one.
pub(crate) struct ScriptedSource {
    values: Vec<u32>,
    position: usize,
}

impl ScriptedSource {
    pub(crate) fn new(values: &[u32]) -> Self {
        Self {
            values: values.to_vec(),
            position: 0,
        }
    }

    pub(crate) fn consumed(&self) -> usize {
        self.position
    }
}

impl RngCore for ScriptedSource {
    fn next_u32(&mut self) -> u32 {
        let value = self.values[self.position];
        self.position += 1;
        value << 1
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_u32()) << 32
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// 31-bit value that the exact bounded draw maps to `outcome` without a redraw
///
/// Picks the middle of the preimage of `outcome`, so the low 31 bits of the
/// product sit near 2^30, far above any rejection threshold.
pub(crate) fn scripted_value(outcome: i32, bound: i32) -> u32 {
    let numerator = (2 * outcome as u64 + 1) << 31;
    (numerator / (2 * bound as u64)) as u32
}

/// Wrapper that counts every draw taken from the inner generator
pub(crate) struct CountingSource<R> {
    inner: R,
    draws: usize,
}

impl<R: RngCore> CountingSource<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner, draws: 0 }
    }

    pub(crate) fn draws(&self) -> usize {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingSource<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws += 1;
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws += 1;
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws += 1;
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws += 1;
        self.inner.try_fill_bytes(dest)
    }
}
