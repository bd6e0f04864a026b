mod arena;
mod handle;
mod node;
mod raw_splay_map;

pub(crate) use handle::Handle;
pub(crate) use raw_splay_map::RawSplayMap;
