//! Integer square root.

/// Floor of `√n` via Newton's method.
///
/// Used to size the share supply minted by a pool's seed deposit.
#[must_use]
pub const fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = n;
    // (x + 1) / 2 written without the overflowing addition.
    let mut y = x / 2 + (x % 2);
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}
