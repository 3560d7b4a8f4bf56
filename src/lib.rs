#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use sv_geom as geom;
pub use sv_object as object;
pub use sv_utils as utils;
