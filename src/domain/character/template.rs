//! 角色描述模板渲染
//!
//! 模板语法:
//! - `{name}` 替换为角色名
//! - `{{` / `}}` 输出字面量花括号
//! - 其它替换字段（位置参数、其它名称、属性/索引访问、转换、格式说明）均视为模板错误

use super::CharacterError;

/// 唯一允许的替换字段
pub const NAME_FIELD: &str = "name";

/// 用角色名渲染描述模板
pub fn render_description(template: &str, name: &str) -> Result<String, CharacterError> {
    let mut out = String::with_capacity(template.len() + name.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    out.push('{');
                    continue;
                }

                let mut field = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    match c {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => {
                            return Err(CharacterError::Format(format!(
                                "unexpected '{{' inside replacement field at byte {}",
                                pos
                            )))
                        }
                        _ => field.push(c),
                    }
                }
                if !closed {
                    return Err(CharacterError::Format(format!(
                        "unclosed '{{' at byte {}",
                        pos
                    )));
                }

                check_field(&field)?;
                out.push_str(name);
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(CharacterError::Format(format!(
                        "single '}}' encountered at byte {}",
                        pos
                    )));
                }
            }
            _ => out.push(ch),
        }
    }

    Ok(out)
}

fn check_field(field: &str) -> Result<(), CharacterError> {
    if field == NAME_FIELD {
        return Ok(());
    }
    if field.is_empty() || field.chars().all(|c| c.is_ascii_digit()) {
        return Err(CharacterError::Format(format!(
            "positional field '{{{}}}' is not supported, use '{{{}}}'",
            field, NAME_FIELD
        )));
    }

    let base_end = field
        .find(|c| matches!(c, '.' | '[' | '!' | ':'))
        .unwrap_or(field.len());
    if &field[..base_end] == NAME_FIELD {
        return Err(CharacterError::Format(format!(
            "unsupported modifier in '{{{}}}'",
            field
        )));
    }

    Err(CharacterError::Format(format!(
        "unknown field '{{{}}}'",
        field
    )))
}
