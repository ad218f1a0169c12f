use bitflags::bitflags;

bitflags! {
    pub struct RenderFlags: u32 {
        const NO_FLAG = 0;
        const KEEP_DOT = 1 << 1;
        const OPEN_VIEWER = 1 << 2;
        const DEBUG = 1 << 3;
    }
}
