use bitflags::bitflags;

bitflags! {
    /// Optional query families a data source can advertise on top of the base contract.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        /// Reverse import lookups ("imported by").
        const IMPORTED_BY = 1 << 0;
    }
}
