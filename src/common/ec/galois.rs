use super::MAX_EC_SIZE;

// GF(256) arithmetic
//------------------------------------------------------------------------------
// Field is GF(2^8) with the QR primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
// (0x11D). Multiplication is carry-less long multiplication of the two
// operands followed by reduction modulo that polynomial, done bit by bit with
// the overflow folded back in on each step.

pub(crate) fn multiply(x: u8, y: u8) -> u8 {
    let mut z: u8 = 0;
    for i in (0..8).rev() {
        z = (z << 1) ^ ((z >> 7) * 0x1D);
        z ^= ((y >> i) & 1) * x;
    }
    z
}

// Generator polynomial
//------------------------------------------------------------------------------
// Builds the degree-`ecl` generator as the product (x - 2^0)(x - 2^1)...
// (x - 2^(ecl-1)) over GF(256), coefficients highest degree first, matching
// the monic polynomials tabulated in Annex A of the standard.

fn generator_polynomial(ecl: usize) -> [u8; MAX_EC_SIZE] {
    debug_assert!(ecl > 0 && ecl <= MAX_EC_SIZE, "Invalid ecc length: {ecl}");

    let mut coeffs = [0u8; MAX_EC_SIZE];
    coeffs[ecl - 1] = 1;

    let mut root = 1u8;
    for _ in 0..ecl {
        for j in 0..ecl {
            coeffs[j] = multiply(coeffs[j], root);
            if j + 1 < ecl {
                coeffs[j] ^= coeffs[j + 1];
            }
        }
        root = multiply(root, 2);
    }
    coeffs
}

// Reed-Solomon remainder
//------------------------------------------------------------------------------
// Polynomial division of `data` (as coefficients of a polynomial with `ecl`
// trailing zero terms) by the generator, returning the `ecl`-byte remainder.

pub(crate) fn compute_remainder(data: &[u8], ecl: usize) -> [u8; MAX_EC_SIZE] {
    let gen = generator_polynomial(ecl);
    let mut res = [0u8; MAX_EC_SIZE];

    for &b in data {
        let factor = b ^ res[0];
        res.rotate_left(1);
        res[ecl - 1] = 0;
        for j in 0..ecl {
            res[j] ^= multiply(gen[j], factor);
        }
    }
    res
}
