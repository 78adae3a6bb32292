// src/models/voucher.rs

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Regular,
    Bold,
    Italic,
}

/// Um bloco do comprovativo, na ordem em que aparece na página.
#[derive(Debug, Clone, PartialEq)]
pub enum VoucherBlock {
    Logo(PathBuf),
    Line {
        text: String,
        style: TextStyle,
        size: u8,
        centered: bool,
    },
    /// Espaço vertical, em linhas.
    Break(f64),
}

impl VoucherBlock {
    pub fn line(text: impl Into<String>, style: TextStyle, size: u8) -> Self {
        VoucherBlock::Line {
            text: text.into(),
            style,
            size,
            centered: false,
        }
    }

    pub fn centered(text: impl Into<String>, style: TextStyle, size: u8) -> Self {
        VoucherBlock::Line {
            text: text.into(),
            style,
            size,
            centered: true,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            VoucherBlock::Line { text, .. } => Some(text),
            _ => None,
        }
    }
}
