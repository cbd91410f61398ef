//! The retrieval-augmented response pipeline.
//!
//! One linear operation per request: embed the customer's message, search
//! the product index, assemble the context digest, template the persona
//! prompt, generate the reply. Collaborator failures never escape
//! `respond`; they are mapped to customer-facing strings.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::errors::{classify_failure, ApiError, FailureKind};
use crate::history::TurnLog;
use crate::llm::GenerativeProvider;
use crate::rag::{build_product_context, ProductStore};

/// Shop persona the instruction template pins the model to.
const PERSONA: &str = "คุณคือ \"น้องโฟกัส\" แอดมินขายฟิล์มกันรอยของร้าน Focus Shield";

/// Placeholder for the history section when the conversation just started.
const EMPTY_HISTORY_PLACEHOLDER: &str = "-";

const QUOTA_MESSAGE: &str =
    "ขออภัยครับ ตอนนี้มีลูกค้าทักเข้ามาเยอะจนโควต้าของน้องโฟกัสเต็มชั่วคราว \
     รบกวนรอสักครู่แล้วค่อยทักมาใหม่นะครับ 🙏";

const NOT_FOUND_MESSAGE: &str =
    "ระบบกำลังสลับไปใช้โมเดลสำรองให้อัตโนมัติครับ ลองรีโหลดหน้าแล้วทักมาอีกครั้งนะครับ";

pub struct ResponsePipeline {
    provider: Arc<dyn GenerativeProvider>,
    store: Arc<dyn ProductStore>,
    generation_model: String,
    config: PipelineConfig,
}

impl ResponsePipeline {
    pub fn new(
        provider: Arc<dyn GenerativeProvider>,
        store: Arc<dyn ProductStore>,
        generation_model: String,
        config: PipelineConfig,
    ) -> Self {
        Self {
            provider,
            store,
            generation_model,
            config,
        }
    }

    pub fn generation_model(&self) -> &str {
        &self.generation_model
    }

    /// Produce a reply for the customer.
    ///
    /// Never returns an error: any collaborator failure is converted to a
    /// customer-facing string here, at the pipeline boundary. Each
    /// collaborator call is attempted exactly once.
    pub async fn respond(&self, user_input: &str, history: &TurnLog) -> String {
        match self.try_respond(user_input, history).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("Pipeline failure: {}", err);
                user_facing_failure(&err.to_string())
            }
        }
    }

    async fn try_respond(&self, user_input: &str, history: &TurnLog) -> Result<String, ApiError> {
        let embedding = self
            .provider
            .embed(user_input, &self.config.embedding_model)
            .await?;
        debug!("Embedded query into {} dimensions", embedding.len());

        let matches = self
            .store
            .match_products(
                &embedding,
                self.config.match_threshold,
                self.config.match_count,
            )
            .await?;
        info!("Similarity search returned {} products", matches.len());

        let context = build_product_context(&matches);
        let prompt = self.build_prompt(user_input, history, &context);

        let reply = self
            .provider
            .generate(&prompt, &self.generation_model)
            .await?;
        if reply.trim().is_empty() {
            return Err(ApiError::Internal(
                "Generation returned an empty reply".to_string(),
            ));
        }
        Ok(reply)
    }

    fn build_prompt(&self, user_input: &str, history: &TurnLog, context: &str) -> String {
        let rendered = history.render_window(self.config.history_window);
        let history_text = if rendered.is_empty() {
            EMPTY_HISTORY_PLACEHOLDER
        } else {
            rendered.as_str()
        };

        format!(
            "บทบาท: {persona}\n\
             \n\
             [ข้อมูลสินค้าที่มีในคลัง]\n\
             {context}\n\
             \n\
             [ประวัติการคุย]\n\
             {history}\n\
             \n\
             [คำถามลูกค้า]\n\
             {question}\n\
             \n\
             --- คำสั่งการตอบ ---\n\
             1. \"ทักทายและถามรุ่น\" ถ้ารู้แค่ว่าลูกค้าอยากได้ฟิล์ม แต่ยังไม่รู้รุ่นมือถือ\n\
             2. \"เสนอทางเลือก\" ถ้ารู้รุ่นแล้วแต่มีฟิล์มหลายแบบ (ใส/ด้าน/กันมอง) ให้ถามความชอบ\n\
             3. \"ปิดการขาย\" เมื่อรู้ครบแล้ว ให้บอกราคาและส่งลิงก์สั่งซื้อ\n\
             4. ห้ามแต่งข้อมูลที่ไม่มีใน [ข้อมูลสินค้าที่มีในคลัง]\n\
             5. ใช้ภาษาพูด สั้น กระชับ น่ารัก เป็นกันเอง",
            persona = PERSONA,
            context = context,
            history = history_text,
            question = user_input,
        )
    }
}

/// Map a collaborator failure to the customer-facing reply.
fn user_facing_failure(detail: &str) -> String {
    match classify_failure(detail) {
        FailureKind::QuotaExceeded => QUOTA_MESSAGE.to_string(),
        FailureKind::ResourceNotFound => NOT_FOUND_MESSAGE.to_string(),
        FailureKind::Unclassified => format!("ระบบขัดข้อง: {}", detail),
    }
}
