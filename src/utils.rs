/// Factorials up to 20! fit in a u64; the validation layer caps the player
/// count well below that.
pub(crate) const FACTORIAL_LIMIT: usize = 21;
pub(crate) const FACTORIALS: [u64; FACTORIAL_LIMIT] = {
    let mut facts = [1u64; FACTORIAL_LIMIT];
    let mut i = 1;
    while i < FACTORIAL_LIMIT {
        facts[i] = facts[i - 1] * (i as u64);
        i += 1;
    }
    facts
};

pub(crate) fn factorial(n: usize) -> u64 {
    FACTORIALS[n]
}

/// Decode the permutation of 0..n with the given rank in the factorial number
/// system (lexicographic order). Rank 0 is the identity, rank n!-1 the full
/// reversal. Each rank maps to a distinct permutation, which lets the
/// permutation space be sharded without materializing it.
pub(crate) fn permutation_from_rank(mut rank: u64, n: usize) -> Vec<usize> {
    let mut available: Vec<usize> = (0..n).collect();
    let mut perm = Vec::with_capacity(n);

    for i in (0..n).rev() {
        let block = FACTORIALS[i];
        let idx = (rank / block) as usize;
        rank %= block;
        perm.push(available.remove(idx));
    }

    perm
}
