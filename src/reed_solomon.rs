//! Classical Reed-Solomon error correction over a generic small Galois field.
//!
//! Mirrors the `reedsolo` convention used by
//! `original_source/aztec_decoder/mode.py` and
//! `original_source/aztec_decoder/codewords.py`: `fcr = 1`, `generator = 2`,
//! syndromes -> Berlekamp-Massey -> Chien search -> Forney.

use crate::error::{AztecDecoderError, Result};
use crate::gf::GaloisField;

/// A Reed-Solomon decoder bound to one Galois field and error-correction
/// symbol count.
pub struct ReedSolomonDecoder {
    gf: GaloisField,
    fcr: u32,
    generator: u32,
    nsym: usize,
}

impl ReedSolomonDecoder {
    /// `nsym` is the number of ECC symbols appended to the message (`2t`).
    pub fn new(gf: GaloisField, fcr: u32, generator: u32, nsym: usize) -> Self {
        ReedSolomonDecoder {
            gf,
            fcr,
            generator,
            nsym,
        }
    }

    /// Corrects `msg` (coefficients MSB-first, message followed by ECC
    /// symbols) in place, returning the corrected codeword.
    ///
    /// # Errors
    /// [`AztecDecoderError::ReedSolomon`] if the number of errors exceeds
    /// `nsym / 2` and the block cannot be corrected.
    pub fn correct(&self, msg: &[u32]) -> Result<Vec<u32>> {
        let syndromes = self.syndromes(msg);
        if syndromes.iter().all(|&s| s == 0) {
            return Ok(msg.to_vec());
        }

        let err_loc = self.berlekamp_massey(&syndromes)?;
        let err_pos = self.chien_search(&err_loc, msg.len())?;
        self.forney_correct(msg, &syndromes, &err_loc, &err_pos)
    }

    fn syndromes(&self, msg: &[u32]) -> Vec<u32> {
        let mut synd = vec![0u32; self.nsym + 1];
        for i in 0..self.nsym {
            let power = self.gf.pow(self.generator, (self.fcr + i as u32) as i64);
            synd[i + 1] = self.gf.poly_eval(msg, power);
        }
        synd
    }

    fn berlekamp_massey(&self, synd: &[u32]) -> Result<Vec<u32>> {
        let mut err_loc = vec![1u32];
        let mut old_loc = vec![1u32];

        for i in 0..self.nsym {
            old_loc.push(0);
            let mut delta = synd[i + 1];
            for j in 1..err_loc.len() {
                delta ^= self.gf.mul(err_loc[err_loc.len() - 1 - j], synd[i + 1 - j]);
            }
            if delta != 0 {
                if old_loc.len() > err_loc.len() {
                    let new_loc = self.gf.poly_scale(&old_loc, delta);
                    old_loc = self.gf.poly_scale(&err_loc, self.gf.inverse(delta));
                    err_loc = new_loc;
                }
                let scaled = self.gf.poly_scale(&old_loc, delta);
                err_loc = self.gf.poly_add(&err_loc, &scaled);
            }
        }

        while !err_loc.is_empty() && err_loc[0] == 0 {
            err_loc.remove(0);
        }
        let errs = err_loc.len() - 1;
        if errs * 2 > self.nsym {
            return Err(AztecDecoderError::ReedSolomon {
                message: "too many errors to correct".to_string(),
            });
        }
        Ok(err_loc)
    }

    fn chien_search(&self, err_loc: &[u32], msg_len: usize) -> Result<Vec<usize>> {
        let errs = err_loc.len() - 1;
        let mut err_pos = Vec::new();
        for i in 0..msg_len {
            let x = self.gf.inverse(self.gf.pow(self.generator, i as i64));
            if self.gf.poly_eval(err_loc, x) == 0 {
                err_pos.push(msg_len - 1 - i);
            }
        }
        if err_pos.len() != errs {
            return Err(AztecDecoderError::ReedSolomon {
                message: "could not locate all errors".to_string(),
            });
        }
        Ok(err_pos)
    }

    fn forney_correct(
        &self,
        msg: &[u32],
        synd: &[u32],
        err_loc: &[u32],
        err_pos: &[usize],
    ) -> Result<Vec<u32>> {
        let mut synd_rev = synd[1..].to_vec();
        synd_rev.reverse();
        let mut full_err_eval = self.gf.poly_mul(&synd_rev, err_loc);
        let drop = full_err_eval.len().saturating_sub(self.nsym);
        full_err_eval.drain(0..drop);

        let mut corrected = msg.to_vec();
        let msg_len = msg.len();
        for &pos in err_pos {
            let x_log = msg_len - 1 - pos;
            let x = self.gf.pow(self.generator, x_log as i64);
            let x_inv = self.gf.inverse(x);

            let err_loc_prime = self.error_locator_derivative(err_loc, x_inv);
            if err_loc_prime == 0 {
                return Err(AztecDecoderError::ReedSolomon {
                    message: "Forney algorithm failed (zero derivative)".to_string(),
                });
            }

            let y = self.gf.mul(x, self.gf.poly_eval(&full_err_eval, x_inv));
            let magnitude = self.gf.div(y, err_loc_prime);
            corrected[pos] ^= magnitude;
        }
        Ok(corrected)
    }

    /// Formal derivative of the error locator polynomial evaluated at `x`,
    /// using the standard odd-power-terms trick over GF(2^k).
    fn error_locator_derivative(&self, err_loc: &[u32], x: u32) -> u32 {
        let mut err_loc_rev = err_loc.to_vec();
        err_loc_rev.reverse();
        let mut result = 0u32;
        for (i, &coef) in err_loc_rev.iter().enumerate().skip(1) {
            if i % 2 == 1 {
                result ^= self.gf.mul(coef, self.gf.pow(x, (i - 1) as i64));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gf16_rs(nsym: usize) -> ReedSolomonDecoder {
        ReedSolomonDecoder::new(GaloisField::new(0x13, 4), 1, 2, nsym)
    }

    #[test]
    fn clean_codeword_passes_through() {
        let rs = gf16_rs(5);
        // Any all-zero block has zero syndromes regardless of content shape.
        let msg = vec![0u32; 10];
        let corrected = rs.correct(&msg).unwrap();
        assert_eq!(corrected, msg);
    }

    #[test]
    fn single_symbol_error_is_corrected() {
        let gf = GaloisField::new(0x13, 4);
        let rs = ReedSolomonDecoder::new(gf.clone(), 1, 2, 4);

        // Build a valid codeword: message symbols with enough zero padding
        // that the generator-based encode step is trivial to emulate by
        // directly computing parity via the same syndromes-are-zero test.
        // Encode 5 data symbols with 4 ECC symbols using the RS generator
        // polynomial, mirroring reedsolo.RSCodec's systematic encoding.
        let data = vec![1u32, 2, 3, 4, 5];
        let nsym = 4;
        let mut gen = vec![1u32];
        for i in 0..nsym {
            let root = gf.pow(2, i as i64);
            gen = gf.poly_mul(&gen, &[1, root]);
        }
        let mut padded = data.clone();
        padded.extend(std::iter::repeat(0).take(nsym));
        let mut remainder = padded.clone();
        for i in 0..data.len() {
            let coef = remainder[i];
            if coef != 0 {
                for (j, &g) in gen.iter().enumerate() {
                    remainder[i + j] ^= gf.mul(g, coef);
                }
            }
        }
        let mut codeword = data.clone();
        codeword.extend_from_slice(&remainder[data.len()..]);

        let mut corrupted = codeword.clone();
        corrupted[2] ^= 0xF;

        let corrected = rs.correct(&corrupted).unwrap();
        assert_eq!(corrected, codeword);
    }

    #[test]
    fn unrecoverable_block_is_an_error() {
        // nsym = 2 corrects at most 1 symbol error; corrupt 2 and the
        // decoder must refuse to guess rather than silently miscorrect.
        let gf = GaloisField::new(0x13, 4);
        let rs = ReedSolomonDecoder::new(gf.clone(), 1, 2, 2);

        let data = vec![1u32, 2, 3, 4, 5, 6];
        let nsym = 2;
        let mut gen = vec![1u32];
        for i in 0..nsym {
            let root = gf.pow(2, i as i64);
            gen = gf.poly_mul(&gen, &[1, root]);
        }
        let mut remainder = data.clone();
        remainder.extend(std::iter::repeat(0).take(nsym));
        for i in 0..data.len() {
            let coef = remainder[i];
            if coef != 0 {
                for (j, &g) in gen.iter().enumerate() {
                    remainder[i + j] ^= gf.mul(g, coef);
                }
            }
        }
        let mut codeword = data.clone();
        codeword.extend_from_slice(&remainder[data.len()..]);

        let mut corrupted = codeword.clone();
        corrupted[0] ^= 0xA;
        corrupted[3] ^= 0x5;

        assert!(rs.correct(&corrupted).is_err());
    }
}
