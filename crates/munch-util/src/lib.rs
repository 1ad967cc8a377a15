// dense u32 ids into Vec-backed arenas; the id of a freshly pushed value is its position
#[macro_export]
macro_rules! make_type_idx {
    ($(#[$meta:meta])* $vis:vis $type_idx_name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis struct $type_idx_name(u32);

        impl $type_idx_name {
            pub fn new(index: usize) -> $type_idx_name {
                debug_assert!(index <= u32::MAX as usize, "index space exhausted");
                $type_idx_name(index as u32)
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }

            pub fn from_push<T>(vec: &mut Vec<T>, val: T) -> $type_idx_name {
                let idx = $type_idx_name::new(vec.len());
                vec.push(val);
                idx
            }
        }

        impl std::fmt::Display for $type_idx_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$type_idx_name> for usize {
            fn from(idx: $type_idx_name) -> usize {
                idx.index()
            }
        }
    };
}
