use bitflags::bitflags;

bitflags! {
    /// Held movement directions, relative to where the camera faces
    ///
    /// Opposite directions may be held together; they cancel out.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Movement: u8 {
        const FORWARD = 0b0001;
        const BACKWARD = 0b0010;
        const LEFT = 0b0100;
        const RIGHT = 0b1000;
    }
}
