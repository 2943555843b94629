use std::collections::HashMap;

use crate::models::NotificationError;

const APPOINTMENT_ACCEPTED_HTML: &str = "\
<html><body>\
<h2>Agendamento Confirmado</h2>\
<p>Olá {{nome}},</p>\
<p>Seu agendamento de visita foi confirmado:</p>\
<ul>\
<li>Data: {{data}}</li>\
<li>Hora: {{hora}}</li>\
<li>Telefone: {{telefone}}</li>\
<li>Mensagem: {{mensagem}}</li>\
</ul>\
<p>Atenciosamente,<br>Sabina Decorações</p>\
</body></html>";

const APPOINTMENT_REJECTED_HTML: &str = "\
<html><body>\
<h2>Agendamento Recusado</h2>\
<p>Olá {{nome}},</p>\
<p>Infelizmente não podemos atender seu agendamento:</p>\
<ul>\
<li>Data: {{data}}</li>\
<li>Hora: {{hora}}</li>\
</ul>\
<p>Entre em contato conosco para buscar um horário alternativo.</p>\
<p>Sabina Decorações</p>\
</body></html>";

const QUOTE_FINAL_PRICE_HTML: &str = "\
<html><body>\
<h2>Preço Final Definido</h2>\
<p>Olá {{nome}},</p>\
<p>O preço final do seu orçamento está pronto:</p>\
<ul>\
<li>Tipo de evento: {{tipo_evento}}</li>\
<li>Pacote: {{pacote}}</li>\
<li>Convidados: {{convidados}}</li>\
<li>Serviços adicionais: {{servicos}}</li>\
<li>Estimativa inicial: {{estimativa}}</li>\
<li>Preço final: {{preco_final}}</li>\
</ul>\
<p>Atenciosamente,<br>Sabina Decorações</p>\
</body></html>";

/// Named message templates with `{{key}}` placeholder substitution.
///
/// Rendering is strict: an unknown template name or a placeholder left
/// unresolved after substitution is a failure, which pushes the dispatcher
/// onto its plain-text fallback path.
pub struct MessageTemplates {
    templates: HashMap<String, String>,
}

impl MessageTemplates {
    pub fn with_templates(templates: HashMap<String, String>) -> Self {
        Self { templates }
    }

    pub fn insert(&mut self, name: &str, body: &str) {
        self.templates.insert(name.to_string(), body.to_string());
    }

    pub fn render(
        &self,
        name: &str,
        context: &[(&str, String)],
    ) -> Result<String, NotificationError> {
        let template = self.templates.get(name).ok_or_else(|| {
            NotificationError::RenderFailure(format!("unknown template '{}'", name))
        })?;

        let mut rendered = template.clone();
        for (key, value) in context {
            rendered = rendered.replace(&format!("{{{{{}}}}}", key), value);
        }

        if rendered.contains("{{") {
            return Err(NotificationError::RenderFailure(format!(
                "unresolved placeholder in template '{}'",
                name
            )));
        }

        Ok(rendered)
    }
}

impl Default for MessageTemplates {
    fn default() -> Self {
        let mut templates = HashMap::new();
        templates.insert(
            "appointment_accepted".to_string(),
            APPOINTMENT_ACCEPTED_HTML.to_string(),
        );
        templates.insert(
            "appointment_rejected".to_string(),
            APPOINTMENT_REJECTED_HTML.to_string(),
        );
        templates.insert(
            "quote_final_price".to_string(),
            QUOTE_FINAL_PRICE_HTML.to_string(),
        );
        Self { templates }
    }
}

/// Derive the plain-text part of an email from its HTML body.
pub fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;

    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                // Tag boundaries become whitespace so words don't merge.
                if !text.ends_with(' ') && !text.is_empty() {
                    text.push(' ');
                }
            }
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn renders_default_accepted_template() {
        let templates = MessageTemplates::default();
        let html = templates
            .render(
                "appointment_accepted",
                &[
                    ("nome", "Maria".to_string()),
                    ("data", "10/10/2026".to_string()),
                    ("hora", "14:00".to_string()),
                    ("telefone", "(11) 99999-8888".to_string()),
                    ("mensagem", "Não informada".to_string()),
                ],
            )
            .unwrap();

        assert!(html.contains("Olá Maria"));
        assert!(html.contains("10/10/2026"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn unknown_template_fails() {
        let templates = MessageTemplates::default();
        let err = templates.render("no_such_template", &[]).unwrap_err();
        assert_matches!(err, NotificationError::RenderFailure(_));
    }

    #[test]
    fn unresolved_placeholder_fails() {
        let templates = MessageTemplates::default();
        let err = templates
            .render("appointment_accepted", &[("nome", "Maria".to_string())])
            .unwrap_err();
        assert_matches!(err, NotificationError::RenderFailure(_));
    }

    #[test]
    fn strip_tags_keeps_text_content() {
        let text = strip_tags("<p>Olá <b>Maria</b>,</p>");
        assert!(text.contains("Olá"));
        assert!(text.contains("Maria"));
        assert!(!text.contains('<'));
    }
}
