// src/services/voucher_service.rs

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{DateTime, Local};
use genpdf::{
    elements,
    fonts::{Builtin, FontData, FontFamily},
    style, Element,
};
use image::GenericImageView;

use crate::{
    common::error::AppError,
    models::voucher::{TextStyle, VoucherBlock},
};

pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Largura do logótipo na página.
pub const LOGO_WIDTH_MM: f64 = 50.0;

// Resolução que o genpdf assume para as imagens
const IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

/// Fator de escala que põe uma imagem de `width_px` píxeis com `LOGO_WIDTH_MM`.
pub fn logo_scale_factor(width_px: u32) -> f64 {
    let natural_width_mm = f64::from(width_px.max(1)) * MM_PER_INCH / IMAGE_DPI;
    LOGO_WIDTH_MM / natural_width_mm
}

// Quem gera o comprovativo. O check-in só conhece esta interface.
pub trait VoucherRenderer: Send + Sync {
    fn render(&self, email: &str, registo: &str, nome: &str) -> Result<PathBuf, AppError>;
}

/// Carrega a família de fontes (`<Família>-Regular.ttf`, `-Bold`, `-Italic`,
/// `-BoldItalic`). Os ficheiros só servem para as métricas: o PDF usa a
/// Helvetica embutida.
pub fn load_fonts(dir: &Path, family: &str) -> Result<FontFamily<FontData>, AppError> {
    genpdf::fonts::from_files(dir, family, Some(Builtin::Helvetica)).map_err(|e| {
        AppError::FontNotFound(format!("'{}' em '{}': {}", family, dir.display(), e))
    })
}

/// Caminho do comprovativo para o par (e-mail, registo).
pub fn voucher_path(output_dir: &Path, email: &str, registo: &str) -> PathBuf {
    let email_limpo = sanitize(&email.replace(['@', '.'], "_"));
    let registo_limpo = sanitize(registo);
    output_dir.join(format!("checkin_{}_{}.pdf", email_limpo, registo_limpo))
}

/// Mantém só alfanuméricos, `-` e `_`.
pub fn sanitize(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// O conteúdo do comprovativo, pela ordem da página.
pub fn layout(
    email: &str,
    nome: &str,
    issued_at: DateTime<Local>,
    logo: Option<&Path>,
) -> Vec<VoucherBlock> {
    use TextStyle::*;

    let mut blocks = Vec::with_capacity(16);

    match logo.filter(|path| path.exists()) {
        Some(path) => {
            blocks.push(VoucherBlock::Logo(path.to_path_buf()));
            blocks.push(VoucherBlock::Break(4.0));
        }
        None => {
            blocks.push(VoucherBlock::centered("BILHETE DIGITAL", Regular, 12));
            blocks.push(VoucherBlock::Break(1.0));
        }
    }

    blocks.push(VoucherBlock::centered("FICA QUE COMPENSA", Bold, 14));
    blocks.push(VoucherBlock::Break(0.8));
    blocks.push(VoucherBlock::line(format!("NOME DO ESTABELECIMENTO: {}", nome), Bold, 12));
    blocks.push(VoucherBlock::line(format!("Email: {}", email), Regular, 12));
    blocks.push(VoucherBlock::line("TERRAS DE BOURO", Bold, 12));
    blocks.push(VoucherBlock::line("NO CORAÇÃO DA NATUREZA", Italic, 11));
    blocks.push(VoucherBlock::line(
        format!("Data/Hora: {}", issued_at.format(TIMESTAMP_FORMAT)),
        Regular,
        12,
    ));
    blocks.push(VoucherBlock::Break(1.0));

    blocks.push(VoucherBlock::line("Este bilhete dá desconto em:", Bold, 12));
    blocks.push(VoucherBlock::line("* Museu do Geira - Entrada Grátis", Regular, 12));
    blocks.push(VoucherBlock::line(
        "* Museu de Vilarinho da Furna - Entrada Grátis",
        Regular,
        12,
    ));
    blocks.push(VoucherBlock::line(
        "* Embarcação Rio Caldo - 50% (sujeito a reserva e disponibilidade)",
        Regular,
        12,
    ));

    blocks
}

#[derive(Clone)]
pub struct VoucherService {
    fonts: Arc<FontFamily<FontData>>,
    output_dir: PathBuf,
    logo_path: PathBuf,
}

impl VoucherService {
    pub fn new(fonts: FontFamily<FontData>, output_dir: PathBuf, logo_path: PathBuf) -> Self {
        Self {
            fonts: Arc::new(fonts),
            output_dir,
            logo_path,
        }
    }

    fn build_document(&self, registo: &str, blocks: Vec<VoucherBlock>) -> Result<genpdf::Document, AppError> {
        let mut doc = genpdf::Document::new((*self.fonts).clone());
        doc.set_title(format!("Check-in {}", registo));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        for block in blocks {
            match block {
                VoucherBlock::Logo(path) => {
                    let logo = image::open(&path)
                        .map_err(|e| AppError::Render(format!("logo '{}': {}", path.display(), e)))?;
                    // O genpdf não aceita canal alfa
                    let logo = image::DynamicImage::ImageRgb8(logo.to_rgb8());
                    let factor = logo_scale_factor(logo.width());
                    let pdf_image = elements::Image::from_dynamic_image(logo)
                        .map_err(|e| AppError::Render(e.to_string()))?
                        .with_scale(genpdf::Scale::new(factor, factor));
                    doc.push(pdf_image);
                }
                VoucherBlock::Line { text, style: text_style, size, centered } => {
                    let mut text_style_pdf = style::Style::new().with_font_size(size);
                    match text_style {
                        TextStyle::Bold => text_style_pdf.set_bold(),
                        TextStyle::Italic => text_style_pdf.set_italic(),
                        TextStyle::Regular => {}
                    }

                    let mut paragraph = elements::Paragraph::new(text);
                    if centered {
                        paragraph.set_alignment(genpdf::Alignment::Center);
                    }
                    doc.push(paragraph.styled(text_style_pdf));
                }
                VoucherBlock::Break(lines) => doc.push(elements::Break::new(lines)),
            }
        }

        Ok(doc)
    }
}

impl VoucherRenderer for VoucherService {
    fn render(&self, email: &str, registo: &str, nome: &str) -> Result<PathBuf, AppError> {
        std::fs::create_dir_all(&self.output_dir)?;

        let blocks = layout(email, nome, Local::now(), Some(&self.logo_path));
        let doc = self.build_document(registo, blocks)?;

        let path = voucher_path(&self.output_dir, email, registo);
        doc.render_to_file(&path)
            .map_err(|e| AppError::Render(format!("'{}': {}", path.display(), e)))?;

        tracing::debug!("🧾 Comprovativo gerado em {}", path.display());
        Ok(path)
    }
}
