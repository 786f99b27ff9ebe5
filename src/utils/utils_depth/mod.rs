use crate::utils::utils_errors::ScenesmithError;

/// Packs metric depth values into RGBA bytes and back.
///
/// The packing is logarithmic fixed point.  For a depth z > 0, the exponent
/// `r = ceil(log2 z)` lands in the red channel with a +128 offset, and the
/// mantissa `z / 2^r` in (0.5, 1.0] fills the green, blue, and alpha channels
/// with its first three truncated base-256 digits.  An exact power of two has
/// mantissa 1.0; its scaled first digit 256 wraps to the byte 0, so the
/// all-zero digit triple stands for mantissa 1.0 on decode and powers of two
/// survive the round trip exactly.
pub struct DepthCodec;
impl DepthCodec {
    pub fn encode(z: f64) -> Result<[u8; 4], ScenesmithError> {
        if !z.is_finite() || z <= 0.0 {
            return Err(ScenesmithError::new_invalid_depth_error(format!("depth {:?} is not a positive finite value.", z).as_str(), file!(), line!()));
        }
        let exponent = z.log2().ceil() as i32;
        let exponent_byte = exponent + 128;
        if exponent_byte < 0 || exponent_byte > 255 {
            return Err(ScenesmithError::new_invalid_depth_error(format!("depth {:?} has exponent {} outside the storable range.", z, exponent).as_str(), file!(), line!()));
        }
        let mantissa = z / (2.0_f64).powi(exponent);

        let g_scaled = mantissa * 256.0;
        let g_byte = (g_scaled as u32 % 256) as u8;
        let b_scaled = g_scaled.fract() * 256.0;
        let b_byte = b_scaled as u8;
        let a_scaled = b_scaled.fract() * 256.0;
        let a_byte = a_scaled as u8;

        return Ok([exponent_byte as u8, g_byte, b_byte, a_byte]);
    }
    pub fn decode(rgba: &[u8; 4]) -> f64 {
        let exponent = rgba[0] as i32 - 128;
        let mantissa = if rgba[1] == 0 && rgba[2] == 0 && rgba[3] == 0 {
            1.0
        } else {
            rgba[1] as f64 / 256.0 + rgba[2] as f64 / 65536.0 + rgba[3] as f64 / 16777216.0
        };
        return (2.0_f64).powi(exponent) * mantissa;
    }
    /// Encodes a depth buffer into interleaved RGBA bytes, four per value.
    pub fn encode_buffer(depths: &[f64]) -> Result<Vec<u8>, ScenesmithError> {
        let mut out_vec = Vec::with_capacity(depths.len() * 4);
        for z in depths {
            let rgba = Self::encode(*z)?;
            out_vec.extend_from_slice(&rgba);
        }
        return Ok(out_vec);
    }
    /// Decodes interleaved RGBA bytes back into a depth buffer.
    pub fn decode_buffer(rgba: &[u8]) -> Result<Vec<f64>, ScenesmithError> {
        if rgba.len() % 4 != 0 {
            return Err(ScenesmithError::new_invalid_depth_error(format!("RGBA buffer length {} is not a multiple of 4.", rgba.len()).as_str(), file!(), line!()));
        }
        let mut out_vec = Vec::with_capacity(rgba.len() / 4);
        for chunk in rgba.chunks_exact(4) {
            out_vec.push(Self::decode(&[chunk[0], chunk[1], chunk[2], chunk[3]]));
        }
        return Ok(out_vec);
    }
}
