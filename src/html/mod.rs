use maud::{html, Markup};

use crate::browser::*;
use crate::data::*;

pub mod components;
pub mod pages;
mod wrappers;
