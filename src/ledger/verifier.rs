use crate::transaction::Address;

/// Checks that `signature` is `address`'s signature over `message`.
///
/// Implementations must answer `false` for anything they cannot parse.
pub trait SignatureVerifier {
    fn verify(&self, address: &Address, message: &[u8], signature: &[u8]) -> bool;
}

impl<F> SignatureVerifier for F
where
    F: Fn(&Address, &[u8], &[u8]) -> bool,
{
    fn verify(&self, address: &Address, message: &[u8], signature: &[u8]) -> bool {
        self(address, message, signature)
    }
}
