/// Opaque GPU object handles
///
/// Each handle wraps the non-zero name the driver assigned to the object.
/// Handles are plain copyable ids: they do not own the object, the scope
/// that created it releases it through the device.

macro_rules! gpu_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw driver name
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            /// Raw driver name
            pub const fn raw(&self) -> u32 {
                self.0
            }
        }
    };
}

gpu_handle!(
    /// Compiled shader stage object
    ShaderHandle
);
gpu_handle!(
    /// Linked program object
    ProgramHandle
);
gpu_handle!(
    /// 2D texture object
    TextureHandle
);
gpu_handle!(
    /// Vertex array object (with its vertex and optional index buffer)
    VertexArrayHandle
);
gpu_handle!(
    /// Framebuffer object
    FramebufferHandle
);
