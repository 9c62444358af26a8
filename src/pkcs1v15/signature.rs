byte_signature!(
    /// `RSASSA-PKCS1-v1_5` signatures as described in [RFC8017 § 8.2].
    ///
    /// Holds exactly `k` big-endian bytes, `k` being the size of the modulus.
    ///
    /// [RFC8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2
    Signature
);
