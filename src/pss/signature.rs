byte_signature!(
    /// RSASSA-PSS signatures as described in [RFC8017 § 8.1].
    ///
    /// [RFC8017 § 8.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.1
    Signature
);
