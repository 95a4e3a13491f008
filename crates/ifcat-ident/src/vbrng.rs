//! The Visual Basic pseudorandom generator behind ADRIFT obfuscation.

/* VB RNG constants */
const VB_RAND1: i32 = 0x43FD_43FD;
const VB_RAND2: i32 = 0x00C3_9EC3;
const VB_RAND3: i32 = 0x00FF_FFFF;
const VB_INIT: i32 = 0x00A0_9E86;

/// Simulation of the Visual Basic pseudorandom number generator that ADRIFT
/// uses as a byte-stream cipher.
///
/// Obfuscated files are XORed against the generator's output stream, so
/// [`translate`](VbRng::translate) is its own inverse when replayed over the
/// same byte positions with a freshly seeded generator. The state advances
/// once per byte and bytes must be fed strictly in file order; each file
/// needs its own generator.
#[derive(Debug, Clone)]
pub struct VbRng {
    state: i32,
}

impl VbRng {
    /// Create a generator seeded with the fixed ADRIFT initial state.
    pub fn new() -> Self {
        Self { state: VB_INIT }
    }

    /// Unobfuscate one byte of the stream.
    ///
    /// Advances the generator state and XORs the next keystream byte into
    /// `byte`. The state advance does not depend on the input, so burned
    /// positions may be translated with any value.
    pub fn translate(&mut self, byte: u8) -> u8 {
        self.state = self.state.wrapping_mul(VB_RAND1).wrapping_add(VB_RAND2) & VB_RAND3;
        // state is masked to 24 bits, so the widening product fits in u32
        let r = u32::from(u8::MAX) * self.state as u32 / (VB_RAND3 as u32 + 1);
        (r as u8) ^ byte
    }

    /// Advance the generator `count` positions, discarding the output.
    pub fn burn(&mut self, count: usize) {
        for _ in 0..count {
            let _ = self.translate(0);
        }
    }

    /// Reseed to the fixed initial state.
    pub fn reset(&mut self) {
        self.state = VB_INIT;
    }
}

impl Default for VbRng {
    fn default() -> Self {
        Self::new()
    }
}
